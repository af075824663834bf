//! Shared chart styling: dimensions, fonts, palette

use crate::models::Config;
use plotters::style::RGBColor;

/// Axis and legend font size in points
pub const FONT_SIZE: u32 = 16;

/// Line stroke width in pixels
pub const STROKE_WIDTH: u32 = 2;

/// Series palette, in assignment order.
///
/// Mirrors the green/magenta/cyan/olive rotation the paper figures use:
/// baseline bars are green, treatment bars magenta.
const PALETTE: [RGBColor; 6] = [
    RGBColor(34, 139, 34),   // green
    RGBColor(186, 85, 211),  // magenta
    RGBColor(0, 158, 178),   // cyan
    RGBColor(189, 183, 107), // olive
    RGBColor(205, 92, 92),   // red
    RGBColor(70, 70, 70),    // gray
];

/// Color assigned to a series index (wraps around)
pub fn series_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Rendering options shared by every chart kind
#[derive(Debug, Clone)]
pub struct ChartStyle {
    /// Figure width in pixels
    pub width: u32,
    /// Figure height in pixels
    pub height: u32,
    /// Font size for labels and legends
    pub font_size: u32,
    /// Stroke width for lines and whiskers
    pub stroke_width: u32,
    /// Fixed y-axis upper bound; derived from the data when absent
    pub y_max: Option<f64>,
    /// Optional chart caption
    pub title: Option<String>,
}

impl ChartStyle {
    /// Build a style from the effective configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            width: config.width,
            height: config.height,
            font_size: FONT_SIZE,
            stroke_width: STROKE_WIDTH,
            y_max: None,
            title: None,
        }
    }

    /// Set a fixed y-axis upper bound
    pub fn with_y_max(mut self, y_max: Option<f64>) -> Self {
        self.y_max = y_max;
        self
    }

    /// Set the chart caption
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Upper y bound: the fixed one, or the data-derived fallback with
    /// 15% headroom
    pub fn resolve_y_max(&self, data_max: f64) -> f64 {
        match self.y_max {
            Some(y) if y > 0.0 => y,
            _ => {
                if data_max > 0.0 {
                    data_max * 1.15
                } else {
                    1.0
                }
            }
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: crate::defaults::DEFAULT_WIDTH,
            height: crate::defaults::DEFAULT_HEIGHT,
            font_size: FONT_SIZE,
            stroke_width: STROKE_WIDTH,
            y_max: None,
            title: None,
        }
    }
}
