//! Console reporting and analysis export

pub mod colored;
pub mod export;
pub mod formatter;

pub use colored::ColoredFormatter;
pub use export::{AnalysisExport, SeriesExport};
pub use formatter::{OutputFormatter, PlainFormatter, SummaryRow};

/// Create the formatter matching the color setting
pub fn create_formatter(use_color: bool) -> Box<dyn OutputFormatter> {
    if use_color {
        Box::new(ColoredFormatter::new())
    } else {
        Box::new(PlainFormatter::new())
    }
}
