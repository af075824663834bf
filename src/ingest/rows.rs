//! Row-per-operation duration lists
//!
//! The dominant result layout: line *k* holds every measured duration for
//! operation *k* as a comma-separated list of microsecond values.

use super::{parse_value, read_file, split_records};
use crate::types::Result;
use std::path::Path;

/// Parse a row-list file into per-row duration vectors.
///
/// Trailing blank lines are dropped; an interior blank line yields an
/// empty row so that later rows keep their index (layouts address rows
/// by position).
pub fn read_row_lists(path: &Path) -> Result<Vec<Vec<f64>>> {
    let content = read_file(path)?;

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            rows.push(Vec::new());
            continue;
        }

        let mut values = Vec::new();
        for (col, token) in split_records(line).iter().enumerate() {
            values.push(parse_value(token, path, line_no + 1, col + 1)?);
        }
        rows.push(values);
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
    fn test_basic_rows() {
        let file = temp_with("100,200,300\n1500.5,2500.75\n");
        let rows = read_row_lists(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![100.0, 200.0, 300.0]);
        assert_eq!(rows[1], vec![1500.5, 2500.75]);
    }

    #[test]
    fn test_trailing_comma_and_blank_line() {
        let file = temp_with("1,2,3,\n4,5\n\n");
        let rows = read_row_lists(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_interior_blank_keeps_index() {
        let file = temp_with("1,2\n\n3,4\n");
        let rows = read_row_lists(file.path()).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].is_empty());
        assert_eq!(rows[2], vec![3.0, 4.0]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let file = temp_with("10,20\r\n30,40\r\n");
        let rows = read_row_lists(file.path()).unwrap();
        assert_eq!(rows, vec![vec![10.0, 20.0], vec![30.0, 40.0]]);
    }

    #[test]
    fn test_malformed_value_names_location() {
        let file = temp_with("1,2\n3,oops,5\n");
        let error = read_row_lists(file.path()).unwrap_err();
        let message = error.to_string();
        assert!(message.contains(":2"));
        assert!(message.contains("column 2"));
        assert!(message.contains("oops"));
    }

    #[test]
    fn test_missing_file() {
        let error = read_row_lists(Path::new("/nonexistent/results.csv")).unwrap_err();
        assert!(matches!(error, crate::error::AppError::Io(_)));
    }
}
