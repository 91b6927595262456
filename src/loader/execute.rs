//! Timed execution of a solution with failure capture

use crate::config::RunOptions;
use crate::error::SolutionError;
use crate::loader::lines::Lines;
use crate::loader::solution::{Answer, Solution};
use crate::logging::LogTracker;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::debug;

/// Elapsed time reported for a failed run
pub const FAILED_ELAPSED: f64 = -1.0;

/// Outcome of one solution run
#[derive(Debug)]
pub struct Execution {
    /// Answer, or the failure the solution raised
    pub result: Result<Answer, SolutionError>,
    /// Wall-clock milliseconds, or [`FAILED_ELAPSED`] on failure
    pub elapsed_ms: f64,
    /// Whether the solution logged anything while running
    pub logged: bool,
}

impl Execution {
    #[inline]
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run `solution` on `lines`, timing it and capturing errors and panics.
///
/// Failures are printed to stderr and returned, never propagated.
pub fn execute(
    solution: &dyn Solution,
    lines: &Lines,
    options: &RunOptions,
    tracker: &LogTracker,
) -> Execution {
    tracker.track();
    let start = Instant::now();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| solution.solve(lines, options)));
    let elapsed = start.elapsed();
    let logged = tracker.restore();

    let result = match outcome {
        Ok(result) => result,
        Err(payload) => Err(SolutionError::Panicked(panic_message(payload.as_ref()))),
    };

    match result {
        Ok(answer) => {
            if logged {
                println!();
            }
            let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
            debug!(elapsed_ms, "solution finished");
            Execution {
                result: Ok(answer),
                elapsed_ms,
                logged,
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Execution {
                result: Err(e),
                elapsed_ms: FAILED_ELAPSED,
                logged,
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
