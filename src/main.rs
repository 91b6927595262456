//! aoc-run - Puzzle solution runner
//!
//! Checks that a puzzle's solution and input exist, reads the input lines,
//! loads the solution program and runs it with timing, optionally re-running
//! on every change.

mod cli;
mod config;
mod error;
mod export;
mod logging;
mod loader;
mod puzzle;
mod watch;

use clap::Parser;
use cli::{Action, Cli};
use config::Config;
use error::Result;
use export::{create_exporter, Report};
use loader::{AccessScope, ExecutableLoader, Loader};
use logging::LogTracker;
use puzzle::create_puzzle;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;
use tracing::debug;

/// Run succeeded
const EXIT_OK: u8 = 0;
/// Puzzle files missing/unreadable, or the solution failed
const EXIT_FAILED: u8 = 1;
/// Usage, configuration, input or loading error
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracker = LogTracker::new();
    logging::init(&tracker);

    let action = match cli.into_action() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match action {
        Action::New {
            project,
            puzzle,
            force,
        } => match create_puzzle(&project, &puzzle, force) {
            Ok(scaffold) => {
                println!("Created {}", scaffold.solution.display());
                if scaffold.input_written {
                    println!("Created {}", scaffold.input.display());
                } else {
                    println!("Kept existing {}", scaffold.input.display());
                }
                ExitCode::from(EXIT_OK)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        },
        Action::Run(config) => {
            let mut loader = Loader::new(
                ExecutableLoader::new(config.project.interpreter.clone()),
                tracker,
            );
            run(&config, &mut loader)
        }
    }
}

/// First run, then the watch loop if requested
fn run(config: &Config, loader: &mut Loader) -> ExitCode {
    let code = match run_once(config, loader, None) {
        Ok(true) => EXIT_OK,
        Ok(false) => EXIT_FAILED,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    if !config.watch {
        return ExitCode::from(code);
    }

    eprintln!("Watching for changes (Ctrl-C to stop)...");
    let poll_interval = Duration::from_millis(config.project.poll_interval_ms);
    let watched = watch::watch_changes(
        &config.solution_file,
        &config.input_file,
        poll_interval,
        |scope| {
            eprintln!("Change detected, re-running {}...", config.puzzle);
            if let Err(e) = run_once(config, loader, Some(scope)) {
                eprintln!("Error: {}", e);
            }
        },
    );

    match watched {
        Ok(()) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// One pass: verify, read, load, execute, report.
///
/// `scope` limits the access check to the changed file and refreshes the
/// matching cache. Returns false when the files are not accessible or the
/// solution failed.
fn run_once(config: &Config, loader: &mut Loader, scope: Option<AccessScope>) -> Result<bool> {
    let puzzle_default = config.puzzle.to_string();

    // === Phase 1: Access ===
    if !loader.verify_access(
        &config.solution_file,
        &config.input_file,
        &puzzle_default,
        scope,
    ) {
        return Ok(false);
    }

    // === Phase 2: Load ===
    let clear_input = matches!(scope, Some(AccessScope::Input | AccessScope::All));
    let clear_solution = matches!(scope, Some(AccessScope::Solution | AccessScope::All));
    let lines = loader.read_lines(&config.input_file, clear_input)?;
    let solution = loader.load_solution(&config.solution_file, clear_solution)?;

    // === Phase 3: Execute ===
    let execution = loader.execute(solution.as_ref(), &lines, &config.options);
    debug!(
        ok = execution.succeeded(),
        logged = execution.logged,
        "run finished"
    );

    // === Phase 4: Report ===
    let report = Report::new(&config.puzzle, config.options.part, &execution);
    let exporter = create_exporter(config.output_format);
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    exporter.export(&report, &mut writer)?;
    writer.flush()?;

    Ok(execution.succeeded())
}
