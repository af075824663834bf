//! Chart rendering via plotters
//!
//! Every renderer takes a data spec already converted into the display
//! unit, an output path, and a `ChartStyle`. The backend (SVG or bitmap)
//! is chosen from the output extension.

pub mod bar;
pub mod hist;
pub mod line;
pub mod style;

pub use bar::{render_grouped_bars, BarChartSpec, BarSeries, BarValue};
pub use hist::{render_histogram, HistogramSpec};
pub use line::{render_cdf, render_lines, LineChartSpec, LineSeriesSpec};
pub use style::{series_color, ChartStyle, FONT_SIZE, STROKE_WIDTH};

use crate::types::{AppError, Result};
use std::fs;
use std::path::Path;

/// Create the output file's parent directory if it does not exist
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::io(format!("Cannot create '{}': {}", parent.display(), e))
            })?;
        }
    }
    Ok(())
}

/// Map any plotters error into a render error
pub(crate) fn render_err<E: std::fmt::Display>(error: E) -> AppError {
    AppError::render(error.to_string())
}
