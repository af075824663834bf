//! Latency sample data models
//!
//! The benchmark harness emits flat sequences of durations in microseconds,
//! keyed by experimental condition. These types give those sequences a name,
//! a producing system, and (for treatment files) a per-operation layout.

use crate::ingest::Condition;
use crate::stats::SummaryStats;
use crate::types::{AppError, Operation, Result, SystemKind, TimeUnit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single measurement taken during a concurrent benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedSample {
    /// Milliseconds since the benchmark started
    pub offset_ms: f64,

    /// Observed latency in microseconds
    pub latency_us: f64,
}

impl TimedSample {
    /// Offset expressed in seconds
    pub fn offset_secs(&self) -> f64 {
        self.offset_ms / 1_000.0
    }

    /// Latency expressed in milliseconds
    pub fn latency_ms(&self) -> f64 {
        self.latency_us / 1_000.0
    }
}

/// A named latency sample: raw microsecond durations under one condition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencySeries {
    /// Human-readable label (used in legends and report rows)
    pub label: String,

    /// Which system produced the measurements
    pub system: SystemKind,

    /// Experimental condition extracted from the filename, if any
    pub condition: Option<Condition>,

    /// Raw durations in microseconds
    pub samples_us: Vec<f64>,
}

impl LatencySeries {
    /// Create a new series
    pub fn new<S: Into<String>>(label: S, system: SystemKind, samples_us: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            system,
            condition: None,
            samples_us,
        }
    }

    /// Attach the condition parsed from the source filename
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples_us.len()
    }

    /// Whether the series holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples_us.is_empty()
    }

    /// Samples converted into the given display unit
    pub fn samples_in(&self, unit: TimeUnit) -> Vec<f64> {
        self.samples_us.iter().map(|v| unit.from_micros(*v)).collect()
    }

    /// Descriptive statistics over the raw microsecond samples
    pub fn summary(&self) -> Result<SummaryStats> {
        SummaryStats::from_samples(&self.samples_us)
    }
}

/// A named sequence of (offset, latency) measurements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedSeries {
    /// Human-readable label
    pub label: String,

    /// Measurements in file order (not necessarily sorted by offset)
    pub samples: Vec<TimedSample>,
}

impl TimedSeries {
    /// Create a new timed series
    pub fn new<S: Into<String>>(label: S, samples: Vec<TimedSample>) -> Self {
        Self {
            label: label.into(),
            samples,
        }
    }

    /// Number of measurements
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series holds no measurements
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest offset in the series, in milliseconds
    pub fn max_offset_ms(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.offset_ms)
            .fold(0.0, f64::max)
    }
}

/// Maps one row of a row-list file to an operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowSpec {
    /// Zero-based row index in the file
    pub row: usize,

    /// Operation measured by that row
    pub op: Operation,

    /// Whether the row holds whole-batch durations that must be
    /// amortized over the number of covered users
    pub amortized: bool,
}

impl RowSpec {
    fn new(row: usize, op: Operation) -> Self {
        Self {
            row,
            op,
            amortized: false,
        }
    }

    fn amortized(row: usize, op: Operation) -> Self {
        Self {
            row,
            op,
            amortized: true,
        }
    }
}

/// Row layout of a disguise-stats result file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowLayout {
    /// Layout name, for diagnostics
    pub name: String,

    /// Row specifications, one per row the layout consumes
    pub rows: Vec<RowSpec>,
}

impl RowLayout {
    /// Layout of a treatment file: eight rows covering disguise
    /// operations and their no-anonymization variants.
    pub fn treatment() -> Self {
        Self {
            name: "treatment".to_string(),
            rows: vec![
                RowSpec::new(0, Operation::CreateAccount),
                RowSpec::amortized(1, Operation::Anonymize),
                RowSpec::new(2, Operation::EditAnonymized),
                RowSpec::new(3, Operation::Delete),
                RowSpec::new(4, Operation::Restore),
                RowSpec::new(5, Operation::Edit),
                RowSpec::new(6, Operation::DeleteNoAnon),
                RowSpec::new(7, Operation::RestoreNoAnon),
            ],
        }
    }

    /// Layout of a baseline file: four rows, no reversal operations
    /// (a baseline cannot restore what it deleted).
    pub fn baseline() -> Self {
        Self {
            name: "baseline".to_string(),
            rows: vec![
                RowSpec::new(0, Operation::CreateAccount),
                RowSpec::amortized(1, Operation::Anonymize),
                RowSpec::new(2, Operation::Edit),
                RowSpec::new(3, Operation::Delete),
            ],
        }
    }

    /// Number of rows this layout expects the file to contain
    pub fn required_rows(&self) -> usize {
        self.rows.iter().map(|spec| spec.row + 1).max().unwrap_or(0)
    }
}

impl std::str::FromStr for RowLayout {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "treatment" | "batch" => Ok(RowLayout::treatment()),
            "baseline" => Ok(RowLayout::baseline()),
            _ => Err(AppError::validation(format!(
                "Unknown row layout '{}' (expected 'treatment' or 'baseline')",
                s
            ))),
        }
    }
}

/// Per-operation samples loaded from one disguise-stats result file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisguiseStats {
    /// Which system produced the file
    pub system: SystemKind,

    /// Condition extracted from the filename, if any
    pub condition: Option<Condition>,

    /// Raw microsecond samples per operation
    pub samples: BTreeMap<String, Vec<f64>>,

    /// Operations in layout order
    pub operations: Vec<Operation>,
}

impl DisguiseStats {
    /// Build per-operation samples from parsed rows.
    ///
    /// `amortize_over` is the number of users a whole-batch row covers;
    /// amortized rows are divided by it to yield per-user durations.
    pub fn from_rows(
        rows: &[Vec<f64>],
        layout: &RowLayout,
        system: SystemKind,
        amortize_over: Option<u32>,
    ) -> Result<Self> {
        if rows.len() < layout.required_rows() {
            return Err(AppError::parse(format!(
                "Result file has {} rows but the '{}' layout needs {}",
                rows.len(),
                layout.name,
                layout.required_rows()
            )));
        }

        let divisor = f64::from(amortize_over.unwrap_or(1).max(1));
        let mut samples = BTreeMap::new();
        let mut operations = Vec::with_capacity(layout.rows.len());

        for spec in &layout.rows {
            let row = &rows[spec.row];
            if row.is_empty() {
                return Err(AppError::parse(format!(
                    "Row {} ({}) holds no samples",
                    spec.row, spec.op
                )));
            }

            let values: Vec<f64> = if spec.amortized {
                row.iter().map(|v| v / divisor).collect()
            } else {
                row.clone()
            };

            operations.push(spec.op);
            samples.insert(spec.op.label().to_string(), values);
        }

        Ok(Self {
            system,
            condition: None,
            samples,
            operations,
        })
    }

    /// Attach the condition parsed from the source filename
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Raw samples for an operation, if the layout produced it
    pub fn samples_for(&self, op: Operation) -> Option<&[f64]> {
        self.samples.get(op.label()).map(|v| v.as_slice())
    }

    /// Summary statistics for an operation, if present
    pub fn summary_for(&self, op: Operation) -> Option<SummaryStats> {
        self.samples_for(op)
            .and_then(|samples| SummaryStats::from_samples(samples).ok())
    }
}
