/// The conversion run: load the results file, then emit the report.
///
/// The whole document is validated before the header is written, so a schema
/// problem anywhere in the file leaves the output untouched.
use crate::csv;
use crate::error::ConvertError;
use crate::results;
use std::io::Write;
use std::path::Path;

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    pub rows: usize,
}

/// Convert the results file at `path` into CSV written to `out`.
pub fn convert<W: Write>(path: &Path, out: W) -> Result<ConvertSummary, ConvertError> {
    let doc = results::load(path)?;
    tracing::debug!(queries = doc.all_metrics.len(), "validated results document");

    let rows = csv::write_report(&doc, out)?;
    tracing::info!(rows, path = %path.display(), "wrote CSV report");

    Ok(ConvertSummary { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn write_fixture(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("LDBC-results.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_convert_example_document() {
        let dir = tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            r#"{"all_metrics": [{"name": "Q1", "run_time": {"count": 10, "mean": 5.5, "min": 1, "max": 20, "50th_percentile": 5, "90th_percentile": 15, "95th_percentile": 18, "99th_percentile": 19}}]}"#,
        );

        let mut out = Vec::new();
        let summary = convert(&path, &mut out).unwrap();

        assert_eq!(summary, ConvertSummary { rows: 1 });
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Query, Count, Mean, Min, Max, 50th, 90th, 95th, 99th\n\
             Q1, 10, 5.5, 1, 20, 5, 15, 18, 19\n"
        );
    }

    #[test]
    fn test_missing_file_writes_nothing() {
        let dir = tempdir().unwrap();
        let mut out = Vec::new();
        let err = convert(&dir.path().join("missing.json"), &mut out).unwrap_err();
        assert!(err.is_parse_error());
        assert!(out.is_empty());
    }

    #[test]
    fn test_malformed_json_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = write_fixture(dir.path(), "not json at all");
        let mut out = Vec::new();
        let err = convert(&path, &mut out).unwrap_err();
        assert!(matches!(err, ConvertError::Json { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_schema_error_after_valid_records_writes_nothing() {
        let dir = tempdir().unwrap();
        let good = json!({"name": "Q1", "run_time": {
            "count": 3, "mean": 1.5, "min": 1, "max": 2,
            "50th_percentile": 1, "90th_percentile": 2,
            "95th_percentile": 2, "99th_percentile": 2
        }});
        let mut bad = good.clone();
        bad["name"] = json!("Q2");
        bad["run_time"].as_object_mut().unwrap().remove("mean");
        let body = json!({"all_metrics": [good, bad]}).to_string();
        let path = write_fixture(dir.path(), &body);

        let mut out = Vec::new();
        let err = convert(&path, &mut out).unwrap_err();
        match err {
            ConvertError::Schema { source, .. } => {
                assert_eq!(source.at(), "all_metrics[1].run_time.mean")
            }
            other => panic!("expected schema error, got {other:?}"),
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_output_failure_is_write_error() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let dir = tempdir().unwrap();
        let path = write_fixture(dir.path(), r#"{"all_metrics": []}"#);
        let err = convert(&path, Closed).unwrap_err();
        assert!(err.is_broken_pipe());
    }
}
