//! Benchmark result file ingestion
//!
//! The benchmarking harness wrote its results in several ad hoc text
//! layouts. Each reader here handles one of them:
//!
//! - `rows`: line *k* is a comma-separated list of durations (µs); the
//!   line index identifies the operation
//! - `pairs`: line *k* is a comma-separated list of `offset:latency`
//!   pairs taken under concurrent load
//! - `bracketed`: each line is `[v1 v2 v3 ]`, space-separated durations
//! - `table`: genuine CSV, one record per row
//!
//! Filenames carry the experimental condition; `Condition` extracts it.

pub mod bracketed;
pub mod condition;
pub mod pairs;
pub mod rows;
pub mod table;

pub use bracketed::read_bracketed;
pub use condition::Condition;
pub use pairs::read_timed_pairs;
pub use rows::read_row_lists;
pub use table::{read_columns, read_table};

use crate::types::{AppError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Input file layouts understood by the ingest layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FileFormat {
    /// Row-per-operation duration lists
    RowList,
    /// Row-per-operation `offset:latency` pairs
    TimedPairs,
    /// Bracketed, space-separated duration lists
    Bracketed,
    /// Plain CSV records
    Table,
}

impl FromStr for FileFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rows" | "rowlist" | "row-list" => Ok(FileFormat::RowList),
            "pairs" | "timed-pairs" | "timeseries" => Ok(FileFormat::TimedPairs),
            "bracketed" => Ok(FileFormat::Bracketed),
            "table" | "csv" => Ok(FileFormat::Table),
            _ => Err(AppError::validation(format!(
                "Unknown input format '{}' (expected rows, pairs, bracketed or table)",
                s
            ))),
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FileFormat::RowList => "rows",
            FileFormat::TimedPairs => "pairs",
            FileFormat::Bracketed => "bracketed",
            FileFormat::Table => "table",
        };
        write!(f, "{}", name)
    }
}

/// Guess the layout of a result file from its first non-blank line.
///
/// Bracketed lines start with `[`; timed-pair lines contain `:`;
/// everything else is treated as a row list. Table files cannot be
/// distinguished from row lists by content and must be requested
/// explicitly.
pub fn sniff_format(path: &Path) -> Result<FileFormat> {
    let content = read_file(path)?;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('[') {
            return Ok(FileFormat::Bracketed);
        }
        if line.contains(':') {
            return Ok(FileFormat::TimedPairs);
        }
        return Ok(FileFormat::RowList);
    }

    Err(AppError::parse(format!(
        "{}: file is empty",
        path.display()
    )))
}

/// Expand a glob pattern into a sorted list of result files.
///
/// An empty match set is an error: a figure rendered from zero files
/// would silently be blank.
pub fn discover(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(AppError::discovery(format!(
            "No files matched pattern '{}'",
            pattern
        )));
    }

    Ok(files)
}

/// Read a whole result file, attributing I/O failures to the path
pub(crate) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("{}: {}", path.display(), e)))
}

/// Parse one duration token, enforcing the non-negative invariant
pub(crate) fn parse_value(token: &str, path: &Path, line_no: usize, col: usize) -> Result<f64> {
    let value: f64 = token.trim().parse().map_err(|_| {
        AppError::parse(format!(
            "{}:{}: column {}: '{}' is not a number",
            path.display(),
            line_no,
            col,
            token.trim()
        ))
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(AppError::parse(format!(
            "{}:{}: column {}: duration {} is not a non-negative finite number",
            path.display(),
            line_no,
            col,
            value
        )));
    }

    Ok(value)
}

/// Split a line on commas, dropping a trailing empty token left by a
/// trailing delimiter
pub(crate) fn split_records(line: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = line.split(',').collect();
    if let Some(last) = tokens.last() {
        if last.trim().is_empty() {
            tokens.pop();
        }
    }
    tokens
}
