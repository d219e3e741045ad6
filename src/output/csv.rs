// CSV export of keyword rows.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// Write `rows` to `path` with a header row, replacing any existing file.
///
/// The header is written even when there are no rows.
pub fn write_rows<T: Serialize>(path: &Path, rows: &[T], headers: &[&str]) -> Result<()> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer
        .write_record(headers)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(rows = rows.len(), path = %path.display(), "Wrote CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        word: String,
        score: f32,
    }

    #[test]
    fn test_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![Row {
            word: "fast, really".to_string(),
            score: 0.5,
        }];
        write_rows(&path, &rows, &["Word", "Score"]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Word,Score\n\"fast, really\",0.5\n");
    }

    #[test]
    fn test_empty_rows_still_have_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        let rows: Vec<Row> = Vec::new();
        write_rows(&path, &rows, &["Word", "Score"]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Word,Score\n");
    }

    #[test]
    fn test_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let rows: Vec<Row> = Vec::new();
        assert!(write_rows(&path, &rows, &["Word"]).is_err());
    }
}
