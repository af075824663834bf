//! Timed-pair rows from concurrent benchmark runs
//!
//! Line *k* holds every measurement for operation *k* as comma-separated
//! `offset:latency` pairs, offset in milliseconds since the benchmark
//! started, latency in microseconds.

use super::{parse_value, read_file, split_records};
use crate::models::TimedSample;
use crate::types::{AppError, Result};
use std::path::Path;

/// Parse a timed-pairs file into per-row sample vectors
pub fn read_timed_pairs(path: &Path) -> Result<Vec<Vec<TimedSample>>> {
    let content = read_file(path)?;

    let mut rows: Vec<Vec<TimedSample>> = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            rows.push(Vec::new());
            continue;
        }

        let mut samples = Vec::new();
        for (col, token) in split_records(line).iter().enumerate() {
            let (offset, latency) = token.trim().split_once(':').ok_or_else(|| {
                AppError::parse(format!(
                    "{}:{}: column {}: expected 'offset:latency', got '{}'",
                    path.display(),
                    line_no + 1,
                    col + 1,
                    token.trim()
                ))
            })?;

            samples.push(TimedSample {
                offset_ms: parse_value(offset, path, line_no + 1, col + 1)?,
                latency_us: parse_value(latency, path, line_no + 1, col + 1)?,
            });
        }
        rows.push(samples);
    }

    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_with(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_basic_pairs() {
        let file = temp_with("0.5:1200,1000:1500\n2000:900\n");
        let rows = read_timed_pairs(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0][0].offset_ms, 0.5);
        assert_eq!(rows[0][0].latency_us, 1200.0);
        assert_eq!(rows[1][0].offset_ms, 2000.0);
    }

    #[test]
    fn test_missing_colon() {
        let file = temp_with("0.5:1200,1000\n");
        let error = read_timed_pairs(file.path()).unwrap_err();
        assert!(error.to_string().contains("offset:latency"));
    }

    #[test]
    fn test_trailing_comma() {
        let file = temp_with("1:2,3:4,\n");
        let rows = read_timed_pairs(file.path()).unwrap();
        assert_eq!(rows[0].len(), 2);
    }

    #[test]
    fn test_negative_latency_rejected() {
        let file = temp_with("1:-5\n");
        assert!(read_timed_pairs(file.path()).is_err());
    }
}
