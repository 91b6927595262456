//! Export system for run reports

mod console;
mod json;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::loader::{Answer, Execution};
use crate::puzzle::Puzzle;
use serde::Serialize;
use std::io::Write;

pub use console::ConsoleExporter;
pub use json::JsonExporter;

/// Summary of one solution run
#[derive(Debug, Serialize)]
pub struct Report {
    pub puzzle: String,
    pub part: Option<u8>,
    pub ok: bool,
    pub answer: Option<Answer>,
    pub error: Option<String>,
    /// Milliseconds, -1 when the run failed
    pub elapsed_ms: f64,
}

impl Report {
    pub fn new(puzzle: &Puzzle, part: Option<u8>, execution: &Execution) -> Self {
        let (answer, error) = match &execution.result {
            Ok(answer) => (Some(answer.clone()), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            puzzle: puzzle.to_string(),
            part,
            ok: execution.succeeded(),
            answer,
            error,
            elapsed_ms: execution.elapsed_ms,
        }
    }
}

/// Trait for output formatting
pub trait Exporter {
    /// Write the complete output for the given report
    fn export(&self, report: &Report, writer: &mut dyn Write) -> Result<()>;
}

/// Create an appropriate exporter based on configuration
pub fn create_exporter(format: OutputFormat) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleExporter),
        OutputFormat::Json => Box::new(JsonExporter),
    }
}
