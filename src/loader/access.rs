//! Existence and readability checks for the solution and input files

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Which of the two puzzle files an access check covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessScope {
    Solution,
    Input,
    All,
}

impl AccessScope {
    fn covers_solution(scope: Option<Self>) -> bool {
        matches!(scope, None | Some(Self::Solution) | Some(Self::All))
    }

    fn covers_input(scope: Option<Self>) -> bool {
        matches!(scope, None | Some(Self::Input) | Some(Self::All))
    }
}

/// First path that failed an access check
#[derive(Debug)]
struct AccessFailure {
    path: PathBuf,
    error: io::Error,
}

/// Check the selected files, printing a hint or warning on failure.
///
/// Returns true when every selected file exists and is readable. A missing
/// file gets a hint pointing at `aoc-run new <puzzle_default>`.
pub fn verify_access(
    solution_file: &Path,
    input_file: &Path,
    puzzle_default: &str,
    scope: Option<AccessScope>,
) -> bool {
    let stdout = io::stdout();
    let stderr = io::stderr();
    verify_access_to(
        &mut stdout.lock(),
        &mut stderr.lock(),
        solution_file,
        input_file,
        puzzle_default,
        scope,
    )
}

/// [`verify_access`] writing hints to `out` and warnings to `err`
pub fn verify_access_to(
    out: &mut dyn Write,
    err: &mut dyn Write,
    solution_file: &Path,
    input_file: &Path,
    puzzle_default: &str,
    scope: Option<AccessScope>,
) -> bool {
    let Err(failure) = check_access(solution_file, input_file, scope) else {
        return true;
    };
    debug!(path = %failure.path.display(), error = %failure.error, "access check failed");

    let message = failure.error.to_string();
    if failure.error.kind() == io::ErrorKind::NotFound {
        let _ = writeln!(
            out,
            "No such file or directory '{}'. Did you mean \"aoc-run \u{1b}[1mnew\u{1b}[0m {}\"?",
            failure.path.display(),
            puzzle_default
        );
    } else if message.is_empty() {
        let _ = writeln!(
            err,
            "Error: cannot access '{}' ({:?})",
            failure.path.display(),
            failure.error.kind()
        );
        std::process::exit(1);
    } else {
        let _ = writeln!(
            err,
            "Warning: cannot access '{}': {}",
            failure.path.display(),
            message
        );
    }
    false
}

fn check_access(
    solution_file: &Path,
    input_file: &Path,
    scope: Option<AccessScope>,
) -> Result<(), AccessFailure> {
    if AccessScope::covers_solution(scope) {
        check_readable(solution_file)?;
    }
    if AccessScope::covers_input(scope) {
        check_readable(input_file)?;
    }
    Ok(())
}

/// Regular files are opened to prove readability; anything else (a FIFO
/// would block on open) only needs to exist.
fn check_readable(path: &Path) -> Result<(), AccessFailure> {
    let failure = |error: io::Error| AccessFailure {
        path: path.to_path_buf(),
        error,
    };
    let metadata = fs::metadata(path).map_err(failure)?;
    if metadata.is_file() {
        File::open(path).map(drop).map_err(failure)?;
    }
    Ok(())
}
