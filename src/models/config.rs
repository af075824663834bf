//! Configuration data model and validation

use crate::types::{AppError, Result, TimeUnit};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory where rendered figures are written
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Unit used on chart axes and in reports
    #[serde(default = "default_unit")]
    pub unit: TimeUnit,

    /// Figure width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Figure height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Bucket width for time-series charts, in milliseconds
    #[serde(default = "default_bucket_width_ms")]
    pub bucket_width_ms: f64,

    /// Number of bins for histograms
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            unit: default_unit(),
            width: default_width(),
            height: default_height(),
            bucket_width_ms: default_bucket_width_ms(),
            histogram_bins: default_histogram_bins(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.width < 100 || self.width > 10_000 {
            return Err(AppError::config(format!(
                "Figure width must be between 100 and 10000 pixels (got {})",
                self.width
            )));
        }

        if self.height < 100 || self.height > 10_000 {
            return Err(AppError::config(format!(
                "Figure height must be between 100 and 10000 pixels (got {})",
                self.height
            )));
        }

        if !self.bucket_width_ms.is_finite() || self.bucket_width_ms <= 0.0 {
            return Err(AppError::config(format!(
                "Bucket width must be a positive number of milliseconds (got {})",
                self.bucket_width_ms
            )));
        }

        if self.histogram_bins == 0 {
            return Err(AppError::config("Histogram bin count must be greater than 0"));
        }

        if self.histogram_bins > 1_000 {
            return Err(AppError::config(format!(
                "Histogram bin count cannot exceed 1000 (got {})",
                self.histogram_bins
            )));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(out_dir) = std::env::var("DBP_OUT_DIR") {
            if !out_dir.trim().is_empty() {
                self.out_dir = PathBuf::from(out_dir.trim());
            }
        }

        if let Ok(unit) = std::env::var("DBP_UNIT") {
            self.unit = unit.trim().parse()?;
        }

        if let Ok(width) = std::env::var("DBP_WIDTH") {
            self.width = width.trim().parse()?;
        }

        if let Ok(height) = std::env::var("DBP_HEIGHT") {
            self.height = height.trim().parse()?;
        }

        if let Ok(bucket) = std::env::var("DBP_BUCKET_WIDTH_MS") {
            self.bucket_width_ms = bucket.trim().parse()?;
        }

        if let Ok(bins) = std::env::var("DBP_HISTOGRAM_BINS") {
            self.histogram_bins = bins.trim().parse()?;
        }

        if let Ok(color) = std::env::var("DBP_COLOR") {
            self.enable_color = matches!(color.trim(), "1" | "true" | "yes" | "on");
        }

        Ok(())
    }

    /// Human-readable configuration summary for debug output
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Configuration:\n");
        summary.push_str(&format!("  Output directory: {}\n", self.out_dir.display()));
        summary.push_str(&format!("  Display unit: {}\n", self.unit));
        summary.push_str(&format!("  Figure size: {}x{}\n", self.width, self.height));
        summary.push_str(&format!("  Bucket width: {} ms\n", self.bucket_width_ms));
        summary.push_str(&format!("  Histogram bins: {}\n", self.histogram_bins));
        summary.push_str(&format!("  Colored output: {}\n", self.enable_color));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));
        summary
    }
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_unit() -> TimeUnit {
    crate::defaults::DEFAULT_UNIT
}

fn default_width() -> u32 {
    crate::defaults::DEFAULT_WIDTH
}

fn default_height() -> u32 {
    crate::defaults::DEFAULT_HEIGHT
}

fn default_bucket_width_ms() -> f64 {
    crate::defaults::DEFAULT_BUCKET_WIDTH_MS
}

fn default_histogram_bins() -> usize {
    crate::defaults::DEFAULT_HISTOGRAM_BINS
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
