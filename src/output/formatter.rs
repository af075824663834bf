//! Core formatting traits and the plain-text implementation

use crate::stats::{Overhead, SummaryStats};
use crate::types::TimeUnit;
use std::fmt::Write as _;

/// One row of a summary table: a labeled sample's statistics in microseconds
#[derive(Debug, Clone)]
pub struct SummaryRow {
    /// Series label
    pub label: String,
    /// Statistics over the raw microsecond samples
    pub stats: SummaryStats,
}

/// Main trait for console output formatting
pub trait OutputFormatter {
    /// Format a section header
    fn format_header(&self, title: &str) -> String;

    /// Format a statistics table, converting into the display unit
    fn format_summary_table(&self, rows: &[SummaryRow], unit: TimeUnit) -> String;

    /// Format an overhead-versus-baseline line
    fn format_overhead(&self, label: &str, overhead: &Overhead) -> String;

    /// Format a warning message
    fn format_warning(&self, message: &str) -> String;

    /// Format a success message
    fn format_success(&self, message: &str) -> String;

    /// Format an error message
    fn format_error(&self, message: &str) -> String;
}

/// Plain text formatter implementation
#[derive(Debug, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    /// Create a new plain formatter
    pub fn new() -> Self {
        Self
    }
}

/// Render the shared table body used by both formatters
pub(crate) fn summary_table_body(rows: &[SummaryRow], unit: TimeUnit) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<32} {:>7} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Series", "Count", "Mean", "Median", "StdDev", "Min", "Max", "P95"
    );
    let _ = writeln!(out, "{}", "-".repeat(104));

    for row in rows {
        let stats = row.stats.in_unit(unit);
        let _ = writeln!(
            out,
            "{:<32} {:>7} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            truncate_label(&row.label, 32),
            stats.count,
            stats.mean,
            stats.median,
            stats.std_dev,
            stats.min,
            stats.max,
            stats.p95
        );
    }

    let _ = writeln!(out, "(values in {})", unit);
    out
}

fn truncate_label(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        label.to_string()
    } else {
        let head: String = label.chars().take(width - 3).collect();
        format!("{}...", head)
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self, title: &str) -> String {
        format!("\n=== {} ===\n", title)
    }

    fn format_summary_table(&self, rows: &[SummaryRow], unit: TimeUnit) -> String {
        summary_table_body(rows, unit)
    }

    fn format_overhead(&self, label: &str, overhead: &Overhead) -> String {
        format!(
            "{}: {:.2}x baseline ({:+.1}%)",
            label, overhead.ratio, overhead.percent
        )
    }

    fn format_warning(&self, message: &str) -> String {
        format!("warning: {}", message)
    }

    fn format_success(&self, message: &str) -> String {
        message.to_string()
    }

    fn format_error(&self, message: &str) -> String {
        format!("error: {}", message)
    }
}
