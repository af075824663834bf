//! Command-line interface: one subcommand per figure kind

pub mod help;

pub use help::HelpSystem;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Disguise benchmark plotter - statistics and paper figures from
/// benchmark result files
#[derive(Parser, Debug, Clone)]
#[command(name = "dbp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Figure to produce
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output directory for figures
    #[arg(long, global = true)]
    pub out_dir: Option<PathBuf>,

    /// Display unit for axes and tables (us, ms, s)
    #[arg(long, global = true)]
    pub unit: Option<String>,

    /// Figure width in pixels
    #[arg(long, global = true)]
    pub width: Option<u32>,

    /// Figure height in pixels
    #[arg(long, global = true)]
    pub height: Option<u32>,

    /// Fixed y-axis upper bound, in display units
    #[arg(long, global = true)]
    pub ymax: Option<f64>,

    /// Chart caption
    #[arg(long, global = true)]
    pub title: Option<String>,

    /// Force colored output
    #[arg(long, global = true)]
    pub color: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Show help for a specific topic (formats, charts, config, examples)
    #[arg(long, value_name = "TOPIC")]
    pub help_topic: Option<String>,
}

/// Statistic reduced from each sample for scaling charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatKind {
    /// Arithmetic mean
    Mean,
    /// Median
    Median,
}

/// Figure kinds, one per subcommand
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Grouped bar chart of per-operation medians with p5/p95 whiskers
    OpStats {
        /// Treatment result file (row-list layout)
        treatment: PathBuf,

        /// Baseline result file to draw alongside the treatment
        #[arg(long)]
        baseline: Option<PathBuf>,

        /// Users covered by amortized rows (default: parsed from filename)
        #[arg(long)]
        users: Option<u32>,

        /// Output image path (.svg or .png)
        #[arg(short, long, default_value = "op_stats.svg")]
        output: PathBuf,
    },

    /// Bucketed mean latency over benchmark time, one line per file
    Timeseries {
        /// Timed-pairs result files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Row index to plot from each file
        #[arg(long, default_value_t = 0)]
        row: usize,

        /// Bucket width in milliseconds
        #[arg(long)]
        bucket_width_ms: Option<f64>,

        /// Output image path (.svg or .png)
        #[arg(short, long, default_value = "timeseries.svg")]
        output: PathBuf,
    },

    /// Latency versus experiment scale, one point per file
    Scaling {
        /// Row-list result files, one per scale step
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Row index to reduce from each file
        #[arg(long, default_value_t = 0)]
        row: usize,

        /// Statistic to plot
        #[arg(long, value_enum, default_value = "mean")]
        stat: StatKind,

        /// Comma-separated x values (default: user counts from filenames)
        #[arg(long)]
        x_values: Option<String>,

        /// Series label
        #[arg(long)]
        label: Option<String>,

        /// Output image path (.svg or .png)
        #[arg(short, long, default_value = "scaling.svg")]
        output: PathBuf,
    },

    /// Histogram of request latencies from one result file
    Hist {
        /// Result file
        file: PathBuf,

        /// Input format override (rows, pairs, bracketed, table)
        #[arg(long)]
        format: Option<String>,

        /// Number of bins
        #[arg(long)]
        bins: Option<usize>,

        /// Row index when the format is row-oriented
        #[arg(long, default_value_t = 0)]
        row: usize,

        /// Table input has a header line
        #[arg(long)]
        has_headers: bool,

        /// Output image path (.svg or .png)
        #[arg(short, long, default_value = "hist.svg")]
        output: PathBuf,
    },

    /// Empirical latency CDF, one line per file
    Cdf {
        /// Result files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Input format override (rows, pairs, bracketed, table)
        #[arg(long)]
        format: Option<String>,

        /// Row index when the format is row-oriented
        #[arg(long, default_value_t = 0)]
        row: usize,

        /// Table input has a header line
        #[arg(long)]
        has_headers: bool,

        /// Output image path (.svg or .png)
        #[arg(short, long, default_value = "cdf.svg")]
        output: PathBuf,
    },

    /// Console statistics table, optionally exported as JSON
    Summary {
        /// Result files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Input format override (rows, pairs, bracketed, table)
        #[arg(long)]
        format: Option<String>,

        /// Table input has a header line
        #[arg(long)]
        has_headers: bool,

        /// Baseline file for overhead lines
        #[arg(long)]
        baseline: Option<PathBuf>,

        /// Write the analysis as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting color flags
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.command.is_none() && self.help_topic.is_none() {
            return Err(
                "Must specify a subcommand (op-stats, timeseries, scaling, hist, cdf, summary) or --help-topic"
                    .to_string(),
            );
        }

        // The entry count is checked after glob expansion; only the
        // syntax is validated here.
        if let Some(Command::Scaling {
            x_values: Some(x_values),
            ..
        }) = &self.command
        {
            let parsed: Result<Vec<f64>, _> = x_values
                .split(',')
                .map(|token| token.trim().parse::<f64>())
                .collect();
            if parsed.is_err() {
                return Err(format!("Invalid --x-values '{}'", x_values));
            }
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            supports_color()
        }
    }

    /// Check if help should be displayed for a specific topic
    pub fn should_show_topic_help(&self) -> bool {
        self.help_topic.is_some()
    }

    /// Display help for the specified topic or main help
    pub fn display_help(&self) -> String {
        let help_system = HelpSystem::new();
        let use_colors = self.use_colors();

        if let Some(topic) = &self.help_topic {
            help_system
                .display_topic_help(topic, use_colors)
                .unwrap_or_else(|| {
                    format!(
                        "Unknown help topic: '{}'\n\nAvailable topics: formats, charts, config, examples\n\n{}",
                        topic,
                        help_system.display_main_help(use_colors)
                    )
                })
        } else {
            help_system.display_main_help(use_colors)
        }
    }
}

/// Detect whether the terminal supports colored output
fn supports_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    match std::env::var("TERM") {
        Ok(term) => term != "dumb",
        Err(_) => false,
    }
}
