//! Console (human-readable) exporter

use crate::error::Result;
use crate::export::{Exporter, Report};
use std::io::Write;

/// Human-readable console output exporter
pub struct ConsoleExporter;

impl Exporter for ConsoleExporter {
    fn export(&self, report: &Report, writer: &mut dyn Write) -> Result<()> {
        match report.part {
            Some(part) => writeln!(writer, "{} (part {})", report.puzzle, part)?,
            None => writeln!(writer, "{}", report.puzzle)?,
        }

        match (&report.answer, &report.error) {
            (Some(answer), _) => {
                writeln!(writer, "  Answer: {}", answer.as_str())?;
                writeln!(writer, "  Time:   {}", format_elapsed(report.elapsed_ms))?;
            }
            (None, Some(error)) => writeln!(writer, "  Failed: {}", error)?,
            (None, None) => writeln!(writer, "  Failed")?,
        }

        Ok(())
    }
}

/// Pick a readable unit for a duration in milliseconds
fn format_elapsed(ms: f64) -> String {
    if ms < 1.0 {
        format!("{:.1} µs", ms * 1000.0)
    } else if ms < 1000.0 {
        format!("{:.3} ms", ms)
    } else {
        format!("{:.3} s", ms / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Answer;

    fn report(answer: Option<&str>, error: Option<&str>, elapsed_ms: f64) -> Report {
        Report {
            puzzle: "2023/01".to_string(),
            part: Some(1),
            ok: answer.is_some(),
            answer: answer.map(Answer::from),
            error: error.map(str::to_string),
            elapsed_ms,
        }
    }

    fn render(report: &Report) -> String {
        let mut output = Vec::new();
        ConsoleExporter.export(report, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_console_export_success() {
        let output = render(&report(Some("42"), None, 12.5));
        assert!(output.contains("2023/01 (part 1)"));
        assert!(output.contains("Answer: 42"));
        assert!(output.contains("12.500 ms"));
    }

    #[test]
    fn test_console_export_failure() {
        let output = render(&report(None, Some("boom"), -1.0));
        assert!(output.contains("Failed: boom"));
        assert!(!output.contains("Answer"));
    }

    #[test]
    fn test_format_elapsed_units() {
        assert_eq!(format_elapsed(0.25), "250.0 µs");
        assert_eq!(format_elapsed(3.0), "3.000 ms");
        assert_eq!(format_elapsed(2500.0), "2.500 s");
    }
}
