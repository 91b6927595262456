//! `aoc-run new`: lay down the files of a fresh puzzle

use crate::config::ProjectConfig;
use crate::error::{Result, RunError};
use crate::puzzle::Puzzle;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Built-in solution template: a shell program reading the input on stdin
const DEFAULT_TEMPLATE: &str = r#"#!/bin/sh
# Puzzle input arrives on stdin, one line per puzzle line.
# $AOC_PART holds the requested part, $AOC_OPTIONS the full options as JSON.
# Print the answer on stdout; anything on stderr is shown as log output.

wc -l
"#;

/// Files touched by `create_puzzle`
#[derive(Debug, PartialEq, Eq)]
pub struct Scaffold {
    pub solution: PathBuf,
    pub input: PathBuf,
    /// False when an existing input was kept
    pub input_written: bool,
}

/// Create the solution and input files of a puzzle.
///
/// An existing solution is only replaced with `force`; an existing input is
/// never replaced.
pub fn create_puzzle(project: &ProjectConfig, puzzle: &Puzzle, force: bool) -> Result<Scaffold> {
    let solution = project.solution_path(puzzle);
    let input = project.input_path(puzzle);

    if solution.exists() && !force {
        return Err(RunError::Scaffold(format!(
            "'{}' already exists (use --force to overwrite)",
            solution.display()
        )));
    }

    let template = match &project.template {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            RunError::Scaffold(format!("cannot read template '{}': {}", path.display(), e))
        })?,
        None => DEFAULT_TEMPLATE.to_string(),
    };

    create_parent(&solution)?;
    fs::write(&solution, template).map_err(|e| {
        RunError::Scaffold(format!("cannot write '{}': {}", solution.display(), e))
    })?;
    if project.interpreter.is_empty() {
        make_executable(&solution)?;
    }
    debug!(path = %solution.display(), "wrote solution template");

    let input_written = if input.exists() {
        false
    } else {
        create_parent(&input)?;
        fs::write(&input, "").map_err(|e| {
            RunError::Scaffold(format!("cannot write '{}': {}", input.display(), e))
        })?;
        debug!(path = %input.display(), "created empty input");
        true
    };

    Ok(Scaffold {
        solution,
        input,
        input_written,
    })
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            RunError::Scaffold(format!(
                "cannot create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o111);
    fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tempfile::TempDir;

    fn project_in(dir: &Path) -> ProjectConfig {
        ProjectConfig {
            solutions_dir: dir.join("solutions"),
            inputs_dir: dir.join("inputs"),
            ..ProjectConfig::default()
        }
    }

    #[test]
    fn test_create_puzzle_writes_both_files() {
        let temp = TempDir::new().unwrap();
        let project = project_in(temp.path());
        let puzzle = Puzzle::from_str("2023/1").unwrap();

        let scaffold = create_puzzle(&project, &puzzle, false).unwrap();

        assert_eq!(scaffold.solution, temp.path().join("solutions/2023/day01"));
        assert_eq!(scaffold.input, temp.path().join("inputs/2023/day01.txt"));
        assert!(scaffold.input_written);
        assert!(fs::read_to_string(&scaffold.solution)
            .unwrap()
            .starts_with("#!/bin/sh"));
        assert_eq!(fs::read_to_string(&scaffold.input).unwrap(), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_create_puzzle_marks_solution_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let project = project_in(temp.path());
        let puzzle = Puzzle::from_str("2023/2").unwrap();

        let scaffold = create_puzzle(&project, &puzzle, false).unwrap();
        let mode = fs::metadata(&scaffold.solution).unwrap().permissions().mode();
        assert_ne!(mode & 0o111, 0);
    }

    #[test]
    fn test_create_puzzle_refuses_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        let project = project_in(temp.path());
        let puzzle = Puzzle::from_str("2023/3").unwrap();

        create_puzzle(&project, &puzzle, false).unwrap();
        let result = create_puzzle(&project, &puzzle, false);

        assert!(matches!(result, Err(RunError::Scaffold(_))));
    }

    #[test]
    fn test_force_keeps_existing_input() {
        let temp = TempDir::new().unwrap();
        let project = project_in(temp.path());
        let puzzle = Puzzle::from_str("2023/4").unwrap();

        let first = create_puzzle(&project, &puzzle, false).unwrap();
        fs::write(&first.input, "1\n2\n").unwrap();
        fs::write(&first.solution, "echo edited\n").unwrap();

        let second = create_puzzle(&project, &puzzle, true).unwrap();
        assert_eq!(fs::read_to_string(&second.solution).unwrap(), DEFAULT_TEMPLATE);
        assert!(!second.input_written);
        assert_eq!(fs::read_to_string(&second.input).unwrap(), "1\n2\n");
    }

    #[test]
    fn test_custom_template() {
        let temp = TempDir::new().unwrap();
        let template = temp.path().join("template.py");
        fs::write(&template, "print(42)\n").unwrap();
        let project = ProjectConfig {
            template: Some(template),
            interpreter: vec!["python3".to_string()],
            solution_extension: Some("py".to_string()),
            ..project_in(temp.path())
        };
        let puzzle = Puzzle::from_str("2023/5").unwrap();

        let scaffold = create_puzzle(&project, &puzzle, false).unwrap();
        assert_eq!(scaffold.solution, temp.path().join("solutions/2023/day05.py"));
        assert_eq!(fs::read_to_string(&scaffold.solution).unwrap(), "print(42)\n");
    }
}
