//! Report rendering and JSON file output.
//!
//! Reports go to the log, either line by line or as pretty JSON. JSON files are
//! pretty-printed with two-space indentation and non-ASCII text kept verbatim.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::analysis::Report;
use crate::error::{Error, Result};

/// Logs a report as readable sections.
pub fn print_report(report: &Report) {
    info!(total = report.total, "Dataset analysis");
    debug!(columns = ?report.columns, "Flattened columns");

    for breakdown in &report.breakdowns {
        info!(field = %breakdown.field, distinct = breakdown.counts.len(), "Breakdown");
        for entry in &breakdown.counts {
            info!("  {:<30} {:>6}", entry.value, entry.count);
        }
    }
}

/// Logs a report as pretty-printed JSON.
pub fn print_json(report: &Report) -> Result<()> {
    let text = serde_json::to_string_pretty(report).map_err(Error::Encode)?;
    info!("{text}");
    Ok(())
}

/// Writes `value` to `path` as pretty-printed JSON, replacing any existing file.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    debug!(path = %path.display(), "Writing JSON");

    let bytes = serde_json::to_vec_pretty(value).map_err(Error::Encode)?;
    fs::write(path, bytes).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::model::ExerciseRecord;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_print_report_does_not_panic() {
        let records = serde_json::from_value::<Vec<ExerciseRecord>>(json!([{"equipment": "barbell"}])).unwrap();
        print_report(&analyze(&records));
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&analyze(&[])).unwrap();
    }

    #[test]
    fn test_write_json_pretty_and_verbatim_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_json(&path, &json!([{"name": "Crunch – Übung"}])).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[\n  {\n    \"name\": \"Crunch – Übung\"\n  }\n]");
    }

    #[test]
    fn test_write_json_serialize_failure_is_encode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        // JSON object keys must be strings
        let value: BTreeMap<(u8, u8), u8> = BTreeMap::from([((1, 2), 3)]);

        let err = write_json(&path, &value).unwrap_err();
        assert!(matches!(err, Error::Encode(_)));
        assert!(err.to_string().starts_with("failed to serialize JSON"));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_json_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");

        let err = write_json(&path, &json!([])).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
