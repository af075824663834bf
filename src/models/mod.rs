//! Data models for configuration and latency samples

pub mod config;
pub mod series;

pub use config::Config;
pub use series::{DisguiseStats, LatencySeries, RowLayout, RowSpec, TimedSample, TimedSeries};
