//! Loading and running puzzle solutions
//!
//! [`Loader`] bundles the runner's file handling: access checks on the
//! solution and input, a single-slot cache of input lines, a single-slot
//! cache of the loaded solution, and timed execution.

mod access;
mod executable;
mod execute;
mod lines;
mod solution;

pub use access::{verify_access, AccessScope};
pub use executable::ExecutableLoader;
pub use execute::{execute, Execution};
pub use lines::{LineCache, Lines};
pub use solution::{Answer, ModuleLoader, Solution, SolutionCache};

use crate::config::RunOptions;
use crate::error::Result;
use crate::logging::LogTracker;
use std::path::Path;
use std::sync::Arc;

/// Caches and runs the solution and input of a puzzle
pub struct Loader<M: ModuleLoader = ExecutableLoader> {
    lines: LineCache,
    solutions: SolutionCache<M>,
    tracker: LogTracker,
}

impl<M: ModuleLoader> Loader<M> {
    pub fn new(module_loader: M, tracker: LogTracker) -> Self {
        Self {
            lines: LineCache::new(),
            solutions: SolutionCache::new(module_loader),
            tracker,
        }
    }

    /// See [`verify_access`]
    pub fn verify_access(
        &self,
        solution_file: &Path,
        input_file: &Path,
        puzzle_default: &str,
        scope: Option<AccessScope>,
    ) -> bool {
        verify_access(solution_file, input_file, puzzle_default, scope)
    }

    /// See [`LineCache::read_lines`]
    pub fn read_lines(&mut self, input_file: &Path, clear_cache: bool) -> Result<Lines> {
        self.lines.read_lines(input_file, clear_cache)
    }

    /// See [`SolutionCache::load_solution`]
    pub fn load_solution(
        &mut self,
        solution_file: &Path,
        clear_cache: bool,
    ) -> Result<Arc<dyn Solution>> {
        self.solutions.load_solution(solution_file, clear_cache)
    }

    /// Run a solution on lines with this loader's log tracker
    pub fn execute(
        &self,
        solution: &dyn Solution,
        lines: &Lines,
        options: &RunOptions,
    ) -> Execution {
        execute(solution, lines, options, &self.tracker)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_full_cycle_with_reload() {
        let temp = TempDir::new().unwrap();
        let solution_path = temp.path().join("day01");
        let input_path = temp.path().join("day01.txt");
        fs::write(&solution_path, "wc -l\n").unwrap();
        fs::write(&input_path, "a\nb\nc\n").unwrap();

        let mut loader = Loader::new(
            ExecutableLoader::new(vec!["sh".to_string()]),
            LogTracker::new(),
        );
        assert!(loader.verify_access(&solution_path, &input_path, "2023/01", None));

        let lines = loader.read_lines(&input_path, false).unwrap();
        let solution = loader.load_solution(&solution_path, false).unwrap();
        let first = loader.execute(solution.as_ref(), &lines, &RunOptions::default());
        assert_eq!(first.result.unwrap(), Answer::from(3));

        fs::write(&solution_path, "echo changed\n").unwrap();
        let cached = loader.load_solution(&solution_path, false).unwrap();
        assert!(Arc::ptr_eq(&solution, &cached));

        let reloaded = loader.load_solution(&solution_path, true).unwrap();
        assert!(!Arc::ptr_eq(&solution, &reloaded));
        let second = loader.execute(reloaded.as_ref(), &lines, &RunOptions::default());
        assert_eq!(second.result.unwrap(), Answer::from("changed"));
    }

    #[test]
    fn test_independent_instances() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.txt");
        let b = temp.path().join("b.txt");
        fs::write(&a, "from a").unwrap();
        fs::write(&b, "from b").unwrap();

        let mut first = Loader::new(ExecutableLoader::default(), LogTracker::new());
        let mut second = Loader::new(ExecutableLoader::default(), LogTracker::new());

        assert_eq!(first.read_lines(&a, false).unwrap()[0], "from a");
        assert_eq!(second.read_lines(&b, false).unwrap()[0], "from b");
    }
}
