//! JSON export of an analysis, for archival next to the figures

use crate::output::formatter::SummaryRow;
use crate::stats;
use crate::types::{Result, TimeUnit};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One exported series: label, statistics in the display unit, outliers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesExport {
    /// Series label
    pub label: String,
    /// Statistics converted into the export unit
    pub stats: stats::SummaryStats,
    /// Number of 1.5*IQR outliers in the raw sample
    pub outliers: usize,
}

/// Full analysis export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisExport {
    /// When this export was generated
    pub generated_at: DateTime<Utc>,
    /// Unit every statistic is expressed in
    pub unit: TimeUnit,
    /// Exported series
    pub series: Vec<SeriesExport>,
}

impl AnalysisExport {
    /// Build an export from summary rows and their raw samples
    pub fn new(rows: &[SummaryRow], raw_samples: &[Vec<f64>], unit: TimeUnit) -> Self {
        let series = rows
            .iter()
            .zip(raw_samples)
            .map(|(row, samples)| SeriesExport {
                label: row.label.clone(),
                stats: row.stats.in_unit(unit),
                outliers: stats::iqr_outliers(samples),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            unit,
            series,
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON export to a file
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)
            .map_err(|e| crate::error::AppError::io(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::SummaryStats;

    #[test]
    fn test_export_round_trip() {
        let samples = vec![1_000.0, 2_000.0, 3_000.0];
        let rows = vec![SummaryRow {
            label: "Restore".to_string(),
            stats: SummaryStats::from_samples(&samples).unwrap(),
        }];
        let export = AnalysisExport::new(&rows, &[samples], TimeUnit::Millis);

        let json = export.to_json().unwrap();
        let parsed: AnalysisExport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.series.len(), 1);
        assert_eq!(parsed.series[0].label, "Restore");
        assert_eq!(parsed.series[0].stats.median, 2.0);
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.json");
        let rows = vec![SummaryRow {
            label: "Edit".to_string(),
            stats: SummaryStats::from_samples(&[5.0]).unwrap(),
        }];
        let export = AnalysisExport::new(&rows, &[vec![5.0]], TimeUnit::Micros);
        export.write_to(&path).unwrap();
        assert!(path.exists());
    }
}
