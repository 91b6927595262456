//! Configuration types for aoc-run

use crate::error::{Result, RunError};
use crate::puzzle::Puzzle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the project config file
pub const DEFAULT_CONFIG_FILE: &str = ".aoc-run.toml";

/// Output format for run reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable console output
    #[default]
    Console,
    /// JSON output with structured data
    Json,
}

/// Project settings read from `.aoc-run.toml`
///
/// Missing fields fall back to their defaults, and a missing file is the
/// same as an empty one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Root directory of solution programs (`<dir>/<year>/dayDD`)
    pub solutions_dir: PathBuf,

    /// Root directory of puzzle inputs (`<dir>/<year>/dayDD.txt`)
    pub inputs_dir: PathBuf,

    /// Extension appended to solution file names, e.g. "py"
    pub solution_extension: Option<String>,

    /// Command prefix used to run solution files, e.g. `["python3"]`.
    /// Empty means solution files are executed directly.
    pub interpreter: Vec<String>,

    /// File copied into place by `aoc-run new` instead of the built-in template
    pub template: Option<PathBuf>,

    /// Polling interval of `--watch`, in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            solutions_dir: PathBuf::from("solutions"),
            inputs_dir: PathBuf::from("inputs"),
            solution_extension: None,
            interpreter: Vec::new(),
            template: None,
            poll_interval_ms: 250,
        }
    }
}

impl ProjectConfig {
    pub fn validate(&self) -> Result<()> {
        if self.solutions_dir.as_os_str().is_empty() {
            return Err(RunError::InvalidConfig(
                "solutions_dir must not be empty".to_string(),
            ));
        }
        if self.inputs_dir.as_os_str().is_empty() {
            return Err(RunError::InvalidConfig(
                "inputs_dir must not be empty".to_string(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(RunError::InvalidConfig(
                "poll_interval_ms must be > 0".to_string(),
            ));
        }
        if self.interpreter.first().is_some_and(|c| c.trim().is_empty()) {
            return Err(RunError::InvalidConfig(
                "interpreter must start with a program name".to_string(),
            ));
        }
        Ok(())
    }

    /// Default solution path for a puzzle
    pub fn solution_path(&self, puzzle: &Puzzle) -> PathBuf {
        let mut name = puzzle.file_stem();
        if let Some(ext) = self.solution_extension.as_deref().filter(|e| !e.is_empty()) {
            name.push('.');
            name.push_str(ext.trim_start_matches('.'));
        }
        self.solutions_dir.join(puzzle.year().to_string()).join(name)
    }

    /// Default input path for a puzzle
    pub fn input_path(&self, puzzle: &Puzzle) -> PathBuf {
        self.inputs_dir
            .join(puzzle.year().to_string())
            .join(format!("{}.txt", puzzle.file_stem()))
    }
}

/// Load the project config from a TOML file.
///
/// If the file is missing, returns `ProjectConfig::default()`.
pub fn load_project_config(path: &Path) -> Result<ProjectConfig> {
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }
    let contents = fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&contents)
        .map_err(|e| RunError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
    config.validate()?;
    Ok(config)
}

/// Options handed to a solution alongside the input lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Puzzle part to solve (1 or 2); `None` lets the solution decide
    pub part: Option<u8>,

    /// Free-form `--param KEY=VALUE` pairs
    pub params: BTreeMap<String, String>,
}

impl RunOptions {
    /// Parse a `KEY=VALUE` pair into `params`
    pub fn insert_param(&mut self, raw: &str) -> Result<()> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| RunError::InvalidParam(raw.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(RunError::InvalidParam(raw.to_string()));
        }
        self.params.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Resolved configuration of a `run` invocation
#[derive(Debug, Clone)]
pub struct Config {
    /// Puzzle being run, also used in remediation hints
    pub puzzle: Puzzle,

    /// Path of the solution program
    pub solution_file: PathBuf,

    /// Path of the puzzle input
    pub input_file: PathBuf,

    /// Options passed to the solution
    pub options: RunOptions,

    /// Output format (console or json)
    pub output_format: OutputFormat,

    /// Re-run whenever the solution or input changes
    pub watch: bool,

    /// Project settings
    pub project: ProjectConfig,
}
