//! Topic-based help system

use colored::Colorize;

/// Provides detailed help text beyond clap's generated usage
#[derive(Debug, Default)]
pub struct HelpSystem;

impl HelpSystem {
    /// Create a new help system
    pub fn new() -> Self {
        Self
    }

    /// Display the main help overview
    pub fn display_main_help(&self, use_colors: bool) -> String {
        let mut out = String::new();
        out.push_str(&self.heading("dbp - disguise benchmark plotter", use_colors));
        out.push_str("\nTurns benchmark result files into summary statistics and paper figures.\n\n");
        out.push_str("Subcommands:\n");
        out.push_str("  op-stats    Grouped bar chart of per-operation medians with p5/p95 whiskers\n");
        out.push_str("  timeseries  Bucketed mean latency over benchmark time\n");
        out.push_str("  scaling     Latency versus experiment scale\n");
        out.push_str("  hist        Histogram of request latencies\n");
        out.push_str("  cdf         Empirical latency CDF\n");
        out.push_str("  summary     Console statistics table (optional JSON export)\n");
        out.push_str("\nHelp topics (--help-topic <TOPIC>): formats, charts, config, examples\n");
        out
    }

    /// Display help for a specific topic, if it exists
    pub fn display_topic_help(&self, topic: &str, use_colors: bool) -> Option<String> {
        match topic.to_lowercase().as_str() {
            "formats" => Some(self.formats_help(use_colors)),
            "charts" => Some(self.charts_help(use_colors)),
            "config" => Some(self.config_help(use_colors)),
            "examples" => Some(self.examples_help(use_colors)),
            _ => None,
        }
    }

    fn heading(&self, text: &str, use_colors: bool) -> String {
        if use_colors {
            text.cyan().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn formats_help(&self, use_colors: bool) -> String {
        let mut out = String::new();
        out.push_str(&self.heading("Input formats", use_colors));
        out.push_str("\n\nThe benchmarking harness wrote several text layouts. All durations are in microseconds.\n\n");
        out.push_str("  rows       Line k holds every duration for operation k, comma-separated:\n");
        out.push_str("               1221,1300,1250\n");
        out.push_str("  pairs      Line k holds offset:latency pairs taken under concurrent load\n");
        out.push_str("             (offset in ms since benchmark start):\n");
        out.push_str("               12.5:1221,940.0:1300\n");
        out.push_str("  bracketed  Space-separated durations wrapped in brackets, one bracket per line:\n");
        out.push_str("               [1221 1300 1250 ]\n");
        out.push_str("  table      Plain CSV records, with or without a header line.\n");
        out.push_str("\nThe format is sniffed from the first line; --format overrides the guess\n");
        out.push_str("(tables cannot be sniffed and must be requested explicitly).\n");
        out
    }

    fn charts_help(&self, use_colors: bool) -> String {
        let mut out = String::new();
        out.push_str(&self.heading("Chart kinds", use_colors));
        out.push_str("\n\n");
        out.push_str("  op-stats    One group per disguise operation, one bar per system.\n");
        out.push_str("              Bar height is the median; whiskers span p5..p95. Groups a\n");
        out.push_str("              baseline cannot express (restores) get an N/A marker.\n");
        out.push_str("  timeseries  Measurements are grouped into fixed-width time buckets and\n");
        out.push_str("              each bucket is averaged; x axis is benchmark time in seconds.\n");
        out.push_str("  scaling     One point per result file: a chosen statistic (mean/median)\n");
        out.push_str("              against the experiment scale, e.g. the number of users.\n");
        out.push_str("  hist        Equal-width latency histogram.\n");
        out.push_str("  cdf         Empirical CDF per file, y axis in percent.\n");
        out.push_str("\nOutput goes to .svg (vector) or .png (bitmap), chosen by extension.\n");
        out
    }

    fn config_help(&self, use_colors: bool) -> String {
        let mut out = String::new();
        out.push_str(&self.heading("Configuration", use_colors));
        out.push_str("\n\nLayers, lowest to highest priority: defaults, .env file, environment\n");
        out.push_str("variables, command-line flags.\n\n");
        out.push_str("Environment variables:\n");
        out.push_str("  DBP_OUT_DIR           Output directory for figures\n");
        out.push_str("  DBP_UNIT              Display unit: us, ms or s\n");
        out.push_str("  DBP_WIDTH             Figure width in pixels\n");
        out.push_str("  DBP_HEIGHT            Figure height in pixels\n");
        out.push_str("  DBP_BUCKET_WIDTH_MS   Time-series bucket width\n");
        out.push_str("  DBP_HISTOGRAM_BINS    Histogram bin count\n");
        out.push_str("  DBP_COLOR             Force colored output (1/true/yes/on)\n");
        out
    }

    fn examples_help(&self, use_colors: bool) -> String {
        let mut out = String::new();
        out.push_str(&self.heading("Examples", use_colors));
        out.push_str("\n\n");
        out.push_str("  # Op-stats figure with a baseline, 100-user amortization from the filename\n");
        out.push_str("  dbp op-stats disguise_stats_20lec_100users_batch.csv \\\n");
        out.push_str("      --baseline disguise_stats_20lec_100users_batch_baseline.csv \\\n");
        out.push_str("      -o websubmit_op_stats.svg\n\n");
        out.push_str("  # Latency over benchmark time for three disguiser intensities\n");
        out.push_str("  dbp timeseries concurrent_disguise_stats_30users_*.csv -o concurrent.svg\n\n");
        out.push_str("  # Mean create-account latency versus user count\n");
        out.push_str("  dbp scaling disguise_stats_20lec_*users.csv --row 0 -o create_scaling.svg\n\n");
        out.push_str("  # Console table in milliseconds plus JSON export\n");
        out.push_str("  dbp summary results/*.csv --json analysis.json\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_help_lists_subcommands() {
        let help = HelpSystem::new().display_main_help(false);
        for name in ["op-stats", "timeseries", "scaling", "hist", "cdf", "summary"] {
            assert!(help.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn test_known_topics() {
        let help = HelpSystem::new();
        for topic in ["formats", "charts", "config", "examples"] {
            assert!(help.display_topic_help(topic, false).is_some());
        }
        assert!(help.display_topic_help("nonsense", false).is_none());
    }

    #[test]
    fn test_formats_topic_mentions_all_formats() {
        let help = HelpSystem::new().display_topic_help("formats", false).unwrap();
        for format in ["rows", "pairs", "bracketed", "table"] {
            assert!(help.contains(format));
        }
    }
}
