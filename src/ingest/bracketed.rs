//! Bracketed duration lists
//!
//! Each line is `[v1 v2 v3 ]`, space-separated microsecond values
//! wrapped in square brackets. All lines of a file concatenate into a
//! single sample (the harness flushed one bracket per run).

use super::{parse_value, read_file};
use crate::types::Result;
use std::path::Path;

/// Parse a bracketed file into one flat sample
pub fn read_bracketed(path: &Path) -> Result<Vec<f64>> {
    let content = read_file(path)?;

    let mut values = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let inner = line
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim();

        for (col, token) in inner.split_whitespace().enumerate() {
            values.push(parse_value(token, path, line_no + 1, col + 1)?);
        }
    }

    Ok(values)
}
