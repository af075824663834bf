//! Plain CSV record tables
//!
//! Some harness outputs are genuine CSV: one record per row, all-numeric
//! fields, with or without a header line (per-user disguise measurements;
//! encryption batch-size/encrypt/decrypt triples).

use crate::types::{AppError, Result};
use csv::ReaderBuilder;
use std::path::Path;

/// Read a CSV file into numeric rows
pub fn read_table(path: &Path, has_headers: bool) -> Result<Vec<Vec<f64>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| AppError::io(format!("{}: {}", path.display(), e)))?;

    let mut rows = Vec::new();
    for (record_no, record) in reader.records().enumerate() {
        let record = record?;
        let mut row = Vec::with_capacity(record.len());
        for (col, field) in record.iter().enumerate() {
            // Tolerate a trailing delimiter; an empty interior field is a
            // real parse error below.
            if field.is_empty() && col == record.len() - 1 {
                continue;
            }
            let value: f64 = field.parse().map_err(|_| {
                AppError::parse(format!(
                    "{}: record {}: column {}: '{}' is not a number",
                    path.display(),
                    record_no + 1,
                    col + 1,
                    field
                ))
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::parse(format!(
                    "{}: record {}: column {}: duration {} is not a non-negative finite number",
                    path.display(),
                    record_no + 1,
                    col + 1,
                    value
                )));
            }
            row.push(value);
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(rows)
}

/// Read a CSV file and transpose it into per-column samples.
///
/// Every record must have the same width; a ragged table would silently
/// misalign columns.
pub fn read_columns(path: &Path, has_headers: bool) -> Result<Vec<Vec<f64>>> {
    let rows = read_table(path, has_headers)?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let width = rows[0].len();
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(AppError::parse(format!(
                "{}: record {} has {} columns, expected {}",
                path.display(),
                i + 1,
                row.len(),
                width
            )));
        }
    }

    let mut columns = vec![Vec::with_capacity(rows.len()); width];
    for row in rows {
        for (col, value) in row.into_iter().enumerate() {
            columns[col].push(value);
        }
    }

    Ok(columns)
}
