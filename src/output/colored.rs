//! Colored console formatter

use super::formatter::{summary_table_body, OutputFormatter, SummaryRow};
use crate::stats::Overhead;
use crate::types::TimeUnit;
use colored::Colorize;

/// Formatter that decorates output with ANSI colors
#[derive(Debug, Default)]
pub struct ColoredFormatter;

impl ColoredFormatter {
    /// Create a new colored formatter
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self, title: &str) -> String {
        format!("\n{}\n", format!("=== {} ===", title).cyan().bold())
    }

    fn format_summary_table(&self, rows: &[SummaryRow], unit: TimeUnit) -> String {
        let body = summary_table_body(rows, unit);
        // Bold the header line, leave the data rows alone.
        match body.split_once('\n') {
            Some((header, rest)) => format!("{}\n{}", header.bold(), rest),
            None => body,
        }
    }

    fn format_overhead(&self, label: &str, overhead: &Overhead) -> String {
        let figure = format!("{:.2}x baseline ({:+.1}%)", overhead.ratio, overhead.percent);
        let figure = if overhead.ratio > 2.0 {
            figure.red().to_string()
        } else if overhead.ratio > 1.2 {
            figure.yellow().to_string()
        } else {
            figure.green().to_string()
        };
        format!("{}: {}", label.bold(), figure)
    }

    fn format_warning(&self, message: &str) -> String {
        format!("{} {}", "warning:".yellow().bold(), message.yellow())
    }

    fn format_success(&self, message: &str) -> String {
        message.green().to_string()
    }

    fn format_error(&self, message: &str) -> String {
        format!("{} {}", "error:".red().bold(), message.red())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::SummaryStats;

    #[test]
    fn test_colored_table_keeps_content() {
        colored::control::set_override(false);
        let formatter = ColoredFormatter::new();
        let rows = vec![SummaryRow {
            label: "Edit".to_string(),
            stats: SummaryStats::from_samples(&[2_000.0]).unwrap(),
        }];
        let table = formatter.format_summary_table(&rows, TimeUnit::Millis);
        assert!(table.contains("Edit"));
        colored::control::unset_override();
    }

    #[test]
    fn test_overhead_severity_text() {
        colored::control::set_override(false);
        let formatter = ColoredFormatter::new();
        let line = formatter.format_overhead(
            "Delete",
            &Overhead {
                ratio: 3.0,
                percent: 200.0,
            },
        );
        assert!(line.contains("3.00x baseline"));
        colored::control::unset_override();
    }
}
