//! Solution plugin contract and the cached solution loader

use crate::config::RunOptions;
use crate::error::{Result, SolutionError};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Value produced by a solution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Answer(String);

impl Answer {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Answer(value)
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer(value.to_string())
    }
}

macro_rules! answer_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Answer {
            fn from(value: $t) -> Self {
                Answer(value.to_string())
            }
        })*
    };
}

answer_from_int!(i32, i64, i128, u32, u64, u128, usize);

/// Entry point every solution exposes
pub trait Solution {
    /// Solve the puzzle for the given input lines
    fn solve(
        &self,
        lines: &[String],
        options: &RunOptions,
    ) -> std::result::Result<Answer, SolutionError>;
}

impl<F> Solution for F
where
    F: Fn(&[String], &RunOptions) -> std::result::Result<Answer, SolutionError>,
{
    fn solve(
        &self,
        lines: &[String],
        options: &RunOptions,
    ) -> std::result::Result<Answer, SolutionError> {
        self(lines, options)
    }
}

/// Wrap a closure as a shared solution (for testing)
#[cfg(test)]
pub fn from_fn<F>(f: F) -> Arc<dyn Solution>
where
    F: Fn(&[String], &RunOptions) -> std::result::Result<Answer, SolutionError> + 'static,
{
    Arc::new(f)
}

/// Resolves solution files into callable solutions
///
/// Implementations keep their own cache keyed by absolute path; `evict`
/// drops that entry so the next `load` reads the file again.
pub trait ModuleLoader {
    /// Load the solution at an absolute path
    fn load(&mut self, path: &Path) -> Result<Arc<dyn Solution>>;

    /// Forget any cached module for an absolute path
    fn evict(&mut self, path: &Path);
}

/// Single-slot cache of the last loaded solution.
///
/// Like [`LineCache`](super::LineCache), the slot is not keyed by path.
pub struct SolutionCache<M: ModuleLoader> {
    loader: M,
    cached: Option<(PathBuf, Arc<dyn Solution>)>,
}

impl<M: ModuleLoader> SolutionCache<M> {
    pub fn new(loader: M) -> Self {
        Self {
            loader,
            cached: None,
        }
    }

    /// Return the solution at `solution_file`, loading it only when the cache is empty
    pub fn load_solution(
        &mut self,
        solution_file: &Path,
        clear_cache: bool,
    ) -> Result<Arc<dyn Solution>> {
        let resolved = std::path::absolute(solution_file)?;

        if clear_cache {
            self.cached = None;
            self.loader.evict(&resolved);
        }

        if let Some((path, solution)) = &self.cached {
            if path != &resolved {
                warn!(
                    cached = %path.display(),
                    requested = %resolved.display(),
                    "solution cache holds another solution; returning cached solution"
                );
            }
            return Ok(Arc::clone(solution));
        }

        let solution = self.loader.load(&resolved)?;
        debug!(path = %resolved.display(), "loaded solution");
        self.cached = Some((resolved, Arc::clone(&solution)));
        Ok(solution)
    }

    #[cfg(test)]
    pub fn loader(&self) -> &M {
        &self.loader
    }
}
