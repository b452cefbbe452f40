//! Batch outcome report (`summary.json`).

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

/// One failed file with its error text.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub file: String,
    pub error: String,
}

/// Accumulated batch outcomes.
///
/// Append-only: workers record exactly one outcome per input file, in
/// whatever order the pool finishes them.
#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub success: Vec<String>,
    pub fail: Vec<Failure>,
}

impl Summary {
    pub fn record_success(&mut self, file: String) {
        self.success.push(file);
    }

    pub fn record_failure(&mut self, file: String, error: String) {
        self.fail.push(Failure { file, error });
    }
}

/// Persist the summary as indented JSON.
///
/// serde_json leaves non-ASCII characters unescaped, so error messages
/// stay human-readable.
pub fn write_summary(summary: &Summary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_json_shape() {
        let mut summary = Summary::default();
        summary.record_success("a.svg".into());
        summary.record_failure("b.svg".into(), "invalid path data".into());

        let json = serde_json::to_string_pretty(&summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["success"][0], "a.svg");
        assert_eq!(value["fail"][0]["file"], "b.svg");
        assert_eq!(value["fail"][0]["error"], "invalid path data");
    }

    #[test]
    fn test_non_ascii_left_unescaped() {
        let mut summary = Summary::default();
        summary.record_failure("図.svg".into(), "パース失敗".into());

        let json = serde_json::to_string_pretty(&summary).unwrap();
        assert!(json.contains("図.svg"));
        assert!(json.contains("パース失敗"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_write_summary_to_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("summary.json");

        let mut summary = Summary::default();
        summary.record_success("a.svg".into());
        write_summary(&summary, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"success\""));
        assert!(text.contains("\"fail\""));
        // indented output, not a single line
        assert!(text.contains('\n'));
    }
}
