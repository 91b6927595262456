//! JSON exporter

use crate::error::{Result, RunError};
use crate::export::{Exporter, Report};
use std::io::Write;

/// JSON output exporter
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export(&self, report: &Report, writer: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *writer, report)
            .map_err(|e| RunError::Io(e.into()))?;
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Answer;

    #[test]
    fn test_json_export() {
        let report = Report {
            puzzle: "2023/01".to_string(),
            part: None,
            ok: true,
            answer: Some(Answer::from(42)),
            error: None,
            elapsed_ms: 1.5,
        };

        let mut output = Vec::new();
        JsonExporter.export(&report, &mut output).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(value["puzzle"], "2023/01");
        assert_eq!(value["answer"], "42");
        assert_eq!(value["ok"], true);
        assert_eq!(value["elapsed_ms"], 1.5);
        assert!(value["part"].is_null());
    }
}
