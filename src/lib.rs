//! Disguise Bench Plotter
//!
//! Turns benchmark result files from a privacy-disguise system into
//! summary statistics and paper-ready figures: grouped bar charts with
//! percentile whiskers, latency-over-time series, scaling curves,
//! histograms and CDFs.

pub mod app;
pub mod charts;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod output;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use app::App;
pub use error::{AppError, Result};
pub use models::{Config, DisguiseStats, LatencySeries, RowLayout, TimedSample, TimedSeries};
pub use stats::{Overhead, SummaryStats};
pub use types::{ImageFormat, Operation, SystemKind, TimeUnit};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use crate::types::TimeUnit;

    pub const DEFAULT_UNIT: TimeUnit = TimeUnit::Millis;
    pub const DEFAULT_WIDTH: u32 = 640;
    pub const DEFAULT_HEIGHT: u32 = 480;
    pub const DEFAULT_BUCKET_WIDTH_MS: f64 = 1_000.0;
    pub const DEFAULT_HISTOGRAM_BINS: usize = 20;
    pub const DEFAULT_ENABLE_COLOR: bool = true;
}
