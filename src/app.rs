//! Application orchestration
//!
//! Dispatches each subcommand through the same pipeline: discover and
//! parse result files, reduce them to statistics, then render a figure
//! or print a report.

use crate::charts::{
    render_cdf, render_grouped_bars, render_histogram, render_lines, BarChartSpec, BarSeries,
    BarValue, ChartStyle, HistogramSpec, LineChartSpec, LineSeriesSpec,
};
use crate::cli::{Cli, Command, StatKind};
use crate::config::{display_config_summary, load_config, validate_output_path};
use crate::ingest::{self, Condition, FileFormat};
use crate::logging::Logger;
use crate::models::{Config, DisguiseStats, LatencySeries, RowLayout, TimedSeries};
use crate::output::{create_formatter, AnalysisExport, OutputFormatter, SummaryRow};
use crate::stats::{self, Overhead, SummaryStats};
use crate::types::{AppError, Operation, Result, SystemKind};
use std::path::{Path, PathBuf};

/// The op-stats figure layout: group label, treatment operation, and the
/// baseline operation shown next to it (None renders an "N/A" marker;
/// a baseline cannot restore what it deleted).
const OP_STATS_GROUPS: [(&str, Operation, Option<Operation>); 6] = [
    ("Create Account", Operation::CreateAccount, Some(Operation::CreateAccount)),
    ("Edit Public Data", Operation::Edit, Some(Operation::Edit)),
    ("Delete Account", Operation::DeleteNoAnon, Some(Operation::Delete)),
    ("Anonymize Account", Operation::Anonymize, Some(Operation::Anonymize)),
    ("Edit Anonymized Data", Operation::EditAnonymized, None),
    ("Restore Deleted Account", Operation::RestoreNoAnon, None),
];

/// Application state shared by every subcommand
pub struct App {
    config: Config,
    logger: Logger,
}

impl App {
    /// Build the application from parsed command-line arguments
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = load_config(cli)?;
        let logger = Logger::from_flags(config.verbose, config.debug, config.enable_color);
        Ok(Self { config, logger })
    }

    /// Run the requested subcommand
    pub fn run(&self, cli: &Cli) -> Result<()> {
        if self.config.debug {
            eprint!("{}", self.config.summary());
        }
        self.logger
            .debug(&format!("effective config: {}", display_config_summary(&self.config)));

        let command = cli
            .command
            .as_ref()
            .ok_or_else(|| AppError::validation("No subcommand given"))?;

        let style = ChartStyle::from_config(&self.config)
            .with_y_max(cli.ymax)
            .with_title(cli.title.clone());

        match command {
            Command::OpStats {
                treatment,
                baseline,
                users,
                output,
            } => self.run_op_stats(treatment, baseline.as_deref(), *users, output, &style),
            Command::Timeseries {
                files,
                row,
                bucket_width_ms,
                output,
            } => self.run_timeseries(files, *row, *bucket_width_ms, output, &style),
            Command::Scaling {
                files,
                row,
                stat,
                x_values,
                label,
                output,
            } => self.run_scaling(files, *row, *stat, x_values.as_deref(), label.as_deref(), output, &style),
            Command::Hist {
                file,
                format,
                bins,
                row,
                has_headers,
                output,
            } => self.run_hist(file, format.as_deref(), *bins, *row, *has_headers, output, &style),
            Command::Cdf {
                files,
                format,
                row,
                has_headers,
                output,
            } => self.run_cdf(files, format.as_deref(), *row, *has_headers, output, &style),
            Command::Summary {
                files,
                format,
                has_headers,
                baseline,
                json,
            } => self.run_summary(
                files,
                format.as_deref(),
                *has_headers,
                baseline.as_deref(),
                json.as_deref(),
            ),
        }
    }

    /// Grouped bar chart of per-operation medians
    fn run_op_stats(
        &self,
        treatment: &Path,
        baseline: Option<&Path>,
        users: Option<u32>,
        output: &Path,
        style: &ChartStyle,
    ) -> Result<()> {
        let treatment_stats = self.load_disguise_stats(
            treatment,
            &RowLayout::treatment(),
            SystemKind::Disguised,
            users,
        )?;
        let baseline_stats = baseline
            .map(|path| {
                self.load_disguise_stats(path, &RowLayout::baseline(), SystemKind::Baseline, users)
            })
            .transpose()?;

        let groups: Vec<String> = OP_STATS_GROUPS
            .iter()
            .map(|(label, _, _)| label.to_string())
            .collect();

        let mut series = Vec::new();
        if let Some(baseline_stats) = &baseline_stats {
            series.push(BarSeries {
                label: SystemKind::Baseline.label().to_string(),
                values: OP_STATS_GROUPS
                    .iter()
                    .map(|(_, _, op)| op.and_then(|op| self.bar_value(baseline_stats, op)))
                    .collect(),
            });
        }
        series.push(BarSeries {
            label: SystemKind::Disguised.label().to_string(),
            values: OP_STATS_GROUPS
                .iter()
                .map(|(_, op, _)| self.bar_value(&treatment_stats, *op))
                .collect(),
        });

        let spec = BarChartSpec {
            groups,
            series,
            y_desc: format!("Time ({})", self.config.unit),
        };

        let path = self.resolve_output(output)?;
        render_grouped_bars(&spec, &path, style)?;
        self.report_figure(&path)?;

        if self.config.verbose {
            let rows: Vec<SummaryRow> = treatment_stats
                .operations
                .iter()
                .filter_map(|op| {
                    treatment_stats.summary_for(*op).map(|stats| SummaryRow {
                        label: op.label().to_string(),
                        stats,
                    })
                })
                .collect();
            let formatter = create_formatter(self.config.enable_color);
            print!(
                "{}",
                formatter.format_summary_table(&rows, self.config.unit)
            );
        }

        Ok(())
    }

    /// Bucketed mean latency over benchmark time
    fn run_timeseries(
        &self,
        files: &[PathBuf],
        row: usize,
        bucket_width_ms: Option<f64>,
        output: &Path,
        style: &ChartStyle,
    ) -> Result<()> {
        let files = self.expand_files(files)?;
        let width_ms = bucket_width_ms.unwrap_or(self.config.bucket_width_ms);
        let mut series = Vec::new();

        for path in &files {
            let rows = ingest::read_timed_pairs(path)?;
            let samples = rows.get(row).ok_or_else(|| {
                AppError::parse(format!(
                    "{}: has {} rows, row {} requested",
                    path.display(),
                    rows.len(),
                    row
                ))
            })?;
            if samples.is_empty() {
                return Err(AppError::parse(format!(
                    "{}: row {} holds no measurements",
                    path.display(),
                    row
                )));
            }

            let timed = TimedSeries::new(self.series_label(path)?, samples.clone());
            let buckets = stats::bucketize(&timed.samples, width_ms)?;
            self.logger.info(&format!(
                "{}: {} measurements spanning {:.1}s in {} buckets",
                path.display(),
                timed.len(),
                timed.max_offset_ms() / 1_000.0,
                buckets.len()
            ));

            series.push(LineSeriesSpec {
                label: timed.label,
                points: buckets
                    .iter()
                    .map(|b| (b.start_ms / 1_000.0, self.config.unit.from_micros(b.mean_us)))
                    .collect(),
            });
        }

        let spec = LineChartSpec {
            series,
            x_desc: "Benchmark Time (s)".to_string(),
            y_desc: format!("Latency ({})", self.config.unit),
            markers: false,
        };

        let path = self.resolve_output(output)?;
        render_lines(&spec, &path, style)?;
        self.report_figure(&path)
    }

    /// A chosen statistic against the experiment scale
    fn run_scaling(
        &self,
        files: &[PathBuf],
        row: usize,
        stat: StatKind,
        x_values: Option<&str>,
        label: Option<&str>,
        output: &Path,
        style: &ChartStyle,
    ) -> Result<()> {
        let explicit_x: Option<Vec<f64>> = x_values
            .map(|raw| {
                raw.split(',')
                    .map(|token| {
                        token.trim().parse::<f64>().map_err(|_| {
                            AppError::validation(format!("Invalid --x-values entry '{}'", token))
                        })
                    })
                    .collect()
            })
            .transpose()?;

        let files = self.expand_files(files)?;
        if let Some(values) = &explicit_x {
            if values.len() != files.len() {
                return Err(AppError::validation(format!(
                    "--x-values has {} entries but {} input files",
                    values.len(),
                    files.len()
                )));
            }
        }

        let mut points = Vec::new();
        for (index, path) in files.iter().enumerate() {
            let rows = ingest::read_row_lists(path)?;
            let samples = rows.get(row).filter(|r| !r.is_empty()).ok_or_else(|| {
                AppError::parse(format!(
                    "{}: row {} is missing or empty",
                    path.display(),
                    row
                ))
            })?;

            let summary = SummaryStats::from_samples(samples)?;
            let y = match stat {
                StatKind::Mean => summary.mean,
                StatKind::Median => summary.median,
            };

            let x = match &explicit_x {
                Some(values) => values[index],
                None => {
                    let condition = Condition::from_path(path)?;
                    f64::from(condition.users.ok_or_else(|| {
                        AppError::discovery(format!(
                            "{}: no user count in the filename; pass --x-values",
                            path.display()
                        ))
                    })?)
                }
            };

            points.push((x, self.config.unit.from_micros(y)));
        }

        points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let stat_name = match stat {
            StatKind::Mean => "Mean",
            StatKind::Median => "Median",
        };
        let spec = LineChartSpec {
            series: vec![LineSeriesSpec {
                label: label.unwrap_or("Latency").to_string(),
                points,
            }],
            x_desc: "Number of users".to_string(),
            y_desc: format!("{} latency ({})", stat_name, self.config.unit),
            markers: true,
        };

        let path = self.resolve_output(output)?;
        render_lines(&spec, &path, style)?;
        self.report_figure(&path)
    }

    /// Latency histogram for one result file
    fn run_hist(
        &self,
        file: &Path,
        format: Option<&str>,
        bins: Option<usize>,
        row: usize,
        has_headers: bool,
        output: &Path,
        style: &ChartStyle,
    ) -> Result<()> {
        let samples_us = self.load_samples(file, format, row, has_headers)?;
        let spec = HistogramSpec {
            values: samples_us
                .iter()
                .map(|v| self.config.unit.from_micros(*v))
                .collect(),
            bins: bins.unwrap_or(self.config.histogram_bins),
            x_desc: format!("Request Completion Time ({})", self.config.unit),
            y_desc: "Number of Requests".to_string(),
        };

        let path = self.resolve_output(output)?;
        render_histogram(&spec, &path, style)?;
        self.report_figure(&path)
    }

    /// Latency CDFs, one line per file
    fn run_cdf(
        &self,
        files: &[PathBuf],
        format: Option<&str>,
        row: usize,
        has_headers: bool,
        output: &Path,
        style: &ChartStyle,
    ) -> Result<()> {
        let files = self.expand_files(files)?;
        let mut series = Vec::new();
        for path in &files {
            let samples_us = self.load_samples(path, format, row, has_headers)?;
            series.push((
                self.series_label(path)?,
                samples_us
                    .iter()
                    .map(|v| self.config.unit.from_micros(*v))
                    .collect(),
            ));
        }

        let path = self.resolve_output(output)?;
        render_cdf(
            &series,
            &format!("Latency ({})", self.config.unit),
            &path,
            style,
        )?;
        self.report_figure(&path)
    }

    /// Console statistics table and optional JSON export
    fn run_summary(
        &self,
        files: &[PathBuf],
        format: Option<&str>,
        has_headers: bool,
        baseline: Option<&Path>,
        json: Option<&Path>,
    ) -> Result<()> {
        let formatter = create_formatter(self.config.enable_color);
        let files = self.expand_files(files)?;

        let mut rows = Vec::new();
        let mut raw_samples = Vec::new();
        for path in &files {
            for series in self.load_labeled_samples(path, format, has_headers)? {
                rows.push(SummaryRow {
                    label: series.label.clone(),
                    stats: series.summary()?,
                });
                raw_samples.push(series.samples_us);
            }
        }

        println!("{}", formatter.format_header("Latency summary"));
        print!(
            "{}",
            formatter.format_summary_table(&rows, self.config.unit)
        );

        for (row, samples) in rows.iter().zip(&raw_samples) {
            if row.stats.dispersion() > 1.0 {
                println!(
                    "{}",
                    formatter.format_warning(&format!(
                        "'{}' has high dispersion (cv={:.2}, {} outliers)",
                        row.label,
                        row.stats.dispersion(),
                        stats::iqr_outliers(samples)
                    ))
                );
            }
        }

        if let Some(baseline_path) = baseline {
            self.report_overheads(baseline_path, &files, format, has_headers, formatter.as_ref())?;
        }

        if let Some(json_path) = json {
            let export = AnalysisExport::new(&rows, &raw_samples, self.config.unit);
            export.write_to(json_path)?;
            println!(
                "{}",
                formatter.format_success(&format!("Wrote {}", json_path.display()))
            );
        }

        Ok(())
    }

    /// Print per-file overhead lines against a baseline file
    fn report_overheads(
        &self,
        baseline_path: &Path,
        files: &[PathBuf],
        format: Option<&str>,
        has_headers: bool,
        formatter: &dyn OutputFormatter,
    ) -> Result<()> {
        let baseline_samples = self.flatten_file(baseline_path, format, has_headers)?;
        let baseline_stats = SummaryStats::from_samples(&baseline_samples)?;

        println!("{}", formatter.format_header("Overhead vs. baseline"));
        for path in files {
            if path == baseline_path {
                continue;
            }
            let samples = self.flatten_file(path, format, has_headers)?;
            let stats = SummaryStats::from_samples(&samples)?;
            let overhead = Overhead::versus(&stats, &baseline_stats)?;
            println!(
                "{}",
                formatter.format_overhead(&self.series_label(path)?, &overhead)
            );
        }

        Ok(())
    }

    /// Parse a disguise-stats file and attach filename metadata
    fn load_disguise_stats(
        &self,
        path: &Path,
        layout: &RowLayout,
        system: SystemKind,
        users_flag: Option<u32>,
    ) -> Result<DisguiseStats> {
        let condition = Condition::from_path(path)?;
        let users = users_flag.or(condition.users);
        if users.is_none() {
            self.logger.warn(&format!(
                "{}: no user count in flag or filename; amortized rows stay whole-batch",
                path.display()
            ));
        }

        let rows = ingest::read_row_lists(path)?;
        self.logger.info(&format!(
            "{}: {} rows, layout '{}', condition '{}'",
            path.display(),
            rows.len(),
            layout.name,
            condition.label()
        ));

        Ok(DisguiseStats::from_rows(&rows, layout, system, users)?.with_condition(condition))
    }

    /// Median bar with p5/p95 whiskers, converted into the display unit
    fn bar_value(&self, stats: &DisguiseStats, op: Operation) -> Option<BarValue> {
        stats.summary_for(op).map(|summary| {
            let scaled = summary.in_unit(self.config.unit);
            let bars = scaled.error_bars();
            BarValue {
                value: scaled.median,
                err_low: bars.lower,
                err_high: bars.upper,
            }
        })
    }

    /// Load one flat sample (µs) from a result file.
    ///
    /// `row` selects the row for row-oriented formats and the column for
    /// tables; bracketed files ignore it.
    fn load_samples(
        &self,
        path: &Path,
        format: Option<&str>,
        row: usize,
        has_headers: bool,
    ) -> Result<Vec<f64>> {
        let format = self.effective_format(path, format)?;

        let samples = match format {
            FileFormat::RowList => {
                let rows = ingest::read_row_lists(path)?;
                rows.get(row).cloned().ok_or_else(|| {
                    AppError::parse(format!(
                        "{}: has {} rows, row {} requested",
                        path.display(),
                        rows.len(),
                        row
                    ))
                })?
            }
            FileFormat::TimedPairs => {
                let rows = ingest::read_timed_pairs(path)?;
                rows.get(row)
                    .ok_or_else(|| {
                        AppError::parse(format!(
                            "{}: has {} rows, row {} requested",
                            path.display(),
                            rows.len(),
                            row
                        ))
                    })?
                    .iter()
                    .map(|sample| sample.latency_us)
                    .collect()
            }
            FileFormat::Bracketed => ingest::read_bracketed(path)?,
            FileFormat::Table => {
                let columns = ingest::read_columns(path, has_headers)?;
                columns.get(row).cloned().ok_or_else(|| {
                    AppError::parse(format!(
                        "{}: has {} columns, column {} requested",
                        path.display(),
                        columns.len(),
                        row
                    ))
                })?
            }
        };

        if samples.is_empty() {
            return Err(AppError::parse(format!(
                "{}: selected sample is empty",
                path.display()
            )));
        }

        Ok(samples)
    }

    /// Load every sample a file holds as labeled series
    fn load_labeled_samples(
        &self,
        path: &Path,
        format: Option<&str>,
        has_headers: bool,
    ) -> Result<Vec<LatencySeries>> {
        let format = self.effective_format(path, format)?;
        let condition = Condition::from_path(path)?;
        let system = condition.system();
        let stem = self.series_label(path)?;

        let make_series = |label: String, samples: Vec<f64>| {
            LatencySeries::new(label, system, samples).with_condition(condition.clone())
        };

        let labeled: Vec<LatencySeries> = match format {
            FileFormat::RowList => ingest::read_row_lists(path)?
                .into_iter()
                .enumerate()
                .filter(|(_, row)| !row.is_empty())
                .map(|(i, row)| make_series(format!("{} [row {}]", stem, i), row))
                .collect(),
            FileFormat::TimedPairs => ingest::read_timed_pairs(path)?
                .into_iter()
                .enumerate()
                .filter(|(_, row)| !row.is_empty())
                .map(|(i, row)| {
                    make_series(
                        format!("{} [row {}]", stem, i),
                        row.iter().map(|sample| sample.latency_us).collect(),
                    )
                })
                .collect(),
            FileFormat::Bracketed => {
                let samples = ingest::read_bracketed(path)?;
                if samples.is_empty() {
                    Vec::new()
                } else {
                    vec![make_series(stem, samples)]
                }
            }
            FileFormat::Table => ingest::read_columns(path, has_headers)?
                .into_iter()
                .enumerate()
                .map(|(i, column)| make_series(format!("{} [col {}]", stem, i), column))
                .collect(),
        };

        if labeled.is_empty() {
            return Err(AppError::parse(format!(
                "{}: file holds no samples",
                path.display()
            )));
        }

        Ok(labeled)
    }

    /// All samples of a file concatenated (for file-level overheads)
    fn flatten_file(&self, path: &Path, format: Option<&str>, has_headers: bool) -> Result<Vec<f64>> {
        Ok(self
            .load_labeled_samples(path, format, has_headers)?
            .into_iter()
            .flat_map(|series| series.samples_us)
            .collect())
    }

    /// Expand glob patterns the shell left unexpanded; plain paths pass
    /// through untouched
    fn expand_files(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut expanded = Vec::new();
        for file in files {
            let text = file.to_string_lossy();
            if text.contains(&['*', '?', '['][..]) {
                let matched = ingest::discover(&text)?;
                self.logger.debug(&format!(
                    "pattern '{}' matched {} files",
                    text,
                    matched.len()
                ));
                expanded.extend(matched);
            } else {
                expanded.push(file.clone());
            }
        }
        Ok(expanded)
    }

    /// Resolve the format flag, falling back to content sniffing
    fn effective_format(&self, path: &Path, format: Option<&str>) -> Result<FileFormat> {
        match format {
            Some(name) => name.parse(),
            None => {
                let sniffed = ingest::sniff_format(path)?;
                self.logger
                    .debug(&format!("{}: sniffed format '{}'", path.display(), sniffed));
                Ok(sniffed)
            }
        }
    }

    /// Legend label for a file: its filename condition, or the file stem
    fn series_label(&self, path: &Path) -> Result<String> {
        let condition = Condition::from_path(path)?;
        let label = condition.label();
        if label != "unlabeled" {
            return Ok(label);
        }
        Ok(path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("series")
            .to_string())
    }

    /// Place relative outputs under the configured output directory
    fn resolve_output(&self, output: &Path) -> Result<PathBuf> {
        let path = if output.is_absolute() {
            output.to_path_buf()
        } else {
            self.config.out_dir.join(output)
        };
        validate_output_path(&path)?;
        Ok(path)
    }

    /// Announce a written figure
    fn report_figure(&self, path: &Path) -> Result<()> {
        let formatter = create_formatter(self.config.enable_color);
        println!(
            "{}",
            formatter.format_success(&format!("Wrote {}", path.display()))
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    fn app_for(args: &[&str]) -> (App, Cli) {
        let cli = Cli::try_parse_from(args).unwrap();
        // Configuration reads the process environment.
        let _env = crate::test_support::env_lock();
        let app = App::from_cli(&cli).unwrap();
        (app, cli)
    }

    fn write_treatment_file(dir: &Path) -> PathBuf {
        let path = dir.join("disguise_stats_20lec_100users_batch.csv");
        // create, anonymize (whole batch), edit-anon, delete, restore,
        // edit, delete-noanon, restore-noanon
        fs::write(
            &path,
            "1000,1200,1100\n200000,220000\n1500,1600\n2000,2100\n3000,3100\n900,950\n1800,1850\n2800,2900\n",
        )
        .unwrap();
        path
    }

    fn write_baseline_file(dir: &Path) -> PathBuf {
        let path = dir.join("disguise_stats_20lec_100users_batch_baseline.csv");
        fs::write(&path, "800,900\n150000,160000\n700,750\n1200,1250\n").unwrap();
        path
    }

    #[test]
    fn test_op_stats_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let treatment = write_treatment_file(dir.path());
        let baseline = write_baseline_file(dir.path());
        let output = dir.path().join("op_stats.svg");

        let (app, cli) = app_for(&[
            "dbp",
            "op-stats",
            treatment.to_str().unwrap(),
            "--baseline",
            baseline.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);
        app.run(&cli).unwrap();

        let svg = fs::read_to_string(&output).unwrap();
        assert!(svg.contains("<svg"));
        // Baseline cannot restore: N/A markers present.
        assert!(svg.contains("N/A"));
    }

    #[test]
    fn test_timeseries_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("concurrent_disguise_stats_30users_cheap.csv");
        fs::write(&input, "100:1500,600:1700,1200:1600,2400:1900\n").unwrap();
        let output = dir.path().join("concurrent.svg");

        let (app, cli) = app_for(&[
            "dbp",
            "timeseries",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);
        app.run(&cli).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_scaling_requires_x_source() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("no_condition_here.csv");
        fs::write(&input, "1000,1100\n").unwrap();
        let output = dir.path().join("scaling.svg");

        let (app, cli) = app_for(&[
            "dbp",
            "scaling",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);
        let error = app.run(&cli).unwrap_err();
        assert!(error.to_string().contains("--x-values"));
    }

    #[test]
    fn test_scaling_with_explicit_x() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        fs::write(&a, "1000,1100\n").unwrap();
        fs::write(&b, "2000,2100\n").unwrap();
        let output = dir.path().join("scaling.svg");

        let (app, cli) = app_for(&[
            "dbp",
            "scaling",
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            "--x-values",
            "5,10",
            "-o",
            output.to_str().unwrap(),
        ]);
        app.run(&cli).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_hist_row_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("short.csv");
        fs::write(&input, "1000,1100\n").unwrap();
        let output = dir.path().join("hist.svg");

        let (app, cli) = app_for(&[
            "dbp",
            "hist",
            input.to_str().unwrap(),
            "--row",
            "5",
            "-o",
            output.to_str().unwrap(),
        ]);
        assert!(app.run(&cli).is_err());
    }

    #[test]
    fn test_summary_with_baseline_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let treatment = dir.path().join("disguise_stats_10users.csv");
        let baseline = dir.path().join("disguise_stats_10users_baseline.csv");
        fs::write(&treatment, "1500,1600,1700\n").unwrap();
        fs::write(&baseline, "1000,1000,1000\n").unwrap();
        let json = dir.path().join("analysis.json");

        let (app, cli) = app_for(&[
            "dbp",
            "--no-color",
            "summary",
            treatment.to_str().unwrap(),
            "--baseline",
            baseline.to_str().unwrap(),
            "--json",
            json.to_str().unwrap(),
        ]);
        app.run(&cli).unwrap();

        let exported = fs::read_to_string(&json).unwrap();
        assert!(exported.contains("\"unit\""));
    }

    #[test]
    fn test_resolve_output_uses_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = app_for(&[
            "dbp",
            "--out-dir",
            dir.path().to_str().unwrap(),
            "summary",
            "a.csv",
        ]);
        let resolved = app.resolve_output(Path::new("fig.svg")).unwrap();
        assert_eq!(resolved, dir.path().join("fig.svg"));
    }
}
