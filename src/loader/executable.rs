//! Solutions implemented as external programs
//!
//! The solution file is a program (or a script run through the configured
//! interpreter). It receives the input lines on stdin and the run options in
//! the environment, prints its answer on stdout and logs on stderr.

use crate::config::RunOptions;
use crate::error::{Result, RunError, SolutionError};
use crate::loader::solution::{Answer, ModuleLoader, Solution};
use crate::logging::SOLUTION_TARGET;
use std::collections::HashMap;
use std::fs::{self, Metadata};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info};

/// Environment variable carrying the requested part
pub const PART_ENV: &str = "AOC_PART";

/// Environment variable carrying the JSON-encoded run options
pub const OPTIONS_ENV: &str = "AOC_OPTIONS";

/// Loads solution programs, caching them by absolute path
#[derive(Debug, Default)]
pub struct ExecutableLoader {
    interpreter: Vec<String>,
    modules: HashMap<PathBuf, Arc<ExternalSolution>>,
}

impl ExecutableLoader {
    /// Create a loader; a non-empty `interpreter` is prefixed to every run
    pub fn new(interpreter: Vec<String>) -> Self {
        Self {
            interpreter,
            modules: HashMap::new(),
        }
    }
}

impl ModuleLoader for ExecutableLoader {
    fn load(&mut self, path: &Path) -> Result<Arc<dyn Solution>> {
        if let Some(module) = self.modules.get(path) {
            return Ok(Arc::clone(module) as Arc<dyn Solution>);
        }

        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RunError::SolutionNotFound {
                path: path.to_path_buf(),
            },
            _ => RunError::Io(e),
        })?;

        if !metadata.is_file() {
            return Err(RunError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        if self.interpreter.is_empty() && !is_executable(&metadata) {
            return Err(RunError::NotExecutable {
                path: path.to_path_buf(),
            });
        }

        let module = Arc::new(ExternalSolution {
            path: path.to_path_buf(),
            interpreter: self.interpreter.clone(),
        });
        debug!(path = %path.display(), "loaded solution program");
        self.modules.insert(path.to_path_buf(), Arc::clone(&module));
        Ok(module)
    }

    fn evict(&mut self, path: &Path) {
        if self.modules.remove(path).is_some() {
            debug!(path = %path.display(), "evicted solution program");
        }
    }
}

#[cfg(unix)]
fn is_executable(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &Metadata) -> bool {
    true
}

/// A loaded solution program
#[derive(Debug)]
pub struct ExternalSolution {
    path: PathBuf,
    interpreter: Vec<String>,
}

impl ExternalSolution {
    fn command(&self) -> Command {
        match self.interpreter.split_first() {
            Some((program, args)) => {
                let mut cmd = Command::new(program);
                cmd.args(args).arg(&self.path);
                cmd
            }
            None => Command::new(&self.path),
        }
    }
}

impl Solution for ExternalSolution {
    fn solve(
        &self,
        lines: &[String],
        options: &RunOptions,
    ) -> std::result::Result<Answer, SolutionError> {
        let options_json =
            serde_json::to_string(options).map_err(|e| SolutionError::Message(e.to_string()))?;

        let mut cmd = self.command();
        cmd.env(OPTIONS_ENV, options_json);
        match options.part {
            Some(part) => cmd.env(PART_ENV, part.to_string()),
            None => cmd.env_remove(PART_ENV),
        };
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(path = %self.path.display(), "spawning solution");
        let mut child = cmd.spawn().map_err(SolutionError::Spawn)?;

        // Feed stdin from a helper thread so a chatty child cannot deadlock us.
        let input = lines.join("\n");
        let stdin = child.stdin.take();
        let writer = thread::spawn(move || {
            if let Some(mut stdin) = stdin {
                if let Err(e) = stdin.write_all(input.as_bytes()) {
                    if e.kind() != io::ErrorKind::BrokenPipe {
                        debug!(err = %e, "failed to write solution stdin");
                    }
                }
            }
        });

        let output = child.wait_with_output().map_err(SolutionError::Spawn)?;
        if writer.join().is_err() {
            debug!("stdin writer thread panicked");
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines() {
            info!(target: SOLUTION_TARGET, "{}", line);
        }

        if !output.status.success() {
            let message = stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .unwrap_or("no error output")
                .to_string();
            return Err(SolutionError::Failed {
                code: output.status.code(),
                message,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(Answer::from(stdout.trim()))
    }
}
