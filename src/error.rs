//! Error types for aoc-run

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for runner operations
pub type Result<T> = std::result::Result<T, RunError>;

/// Errors raised while preparing or driving a puzzle run
#[derive(Error, Debug)]
pub enum RunError {
    /// Puzzle input could not be read
    #[error("Cannot read input '{}': {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Solution path does not exist
    #[error("Solution '{}' does not exist", path.display())]
    SolutionNotFound { path: PathBuf },

    /// Solution path exists but is not a regular file
    #[error("Solution '{}' is not a file", path.display())]
    NotAFile { path: PathBuf },

    /// Solution file has no entry point the runner can call
    #[error(
        "Solution '{}' is not executable. Mark it executable (chmod +x) \
         or set `interpreter` in the config file",
        path.display()
    )]
    NotExecutable { path: PathBuf },

    /// Puzzle identifier could not be parsed
    #[error("Invalid puzzle '{0}': expected YEAR/DAY, e.g. 2023/01")]
    InvalidPuzzle(String),

    /// Malformed --param value
    #[error("Invalid parameter '{0}': expected KEY=VALUE")]
    InvalidParam(String),

    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Creating puzzle files failed
    #[error("Cannot create puzzle: {0}")]
    Scaffold(String),

    /// File watcher failure
    #[error("Watch error: {0}")]
    Watch(String),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a solution run, returned as data by the execution wrapper
#[derive(Error, Debug)]
pub enum SolutionError {
    /// External solution exited unsuccessfully
    #[error("solution exited with {}: {message}", describe_exit(*code))]
    Failed { code: Option<i32>, message: String },

    /// External solution could not be started
    #[error("cannot start solution: {0}")]
    Spawn(#[source] std::io::Error),

    /// In-process solution panicked
    #[error("solution panicked: {0}")]
    Panicked(String),

    /// Error reported by an in-process solution
    #[error("{0}")]
    Message(String),
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

impl From<&str> for SolutionError {
    fn from(message: &str) -> Self {
        SolutionError::Message(message.to_string())
    }
}

impl From<String> for SolutionError {
    fn from(message: String) -> Self {
        SolutionError::Message(message)
    }
}
