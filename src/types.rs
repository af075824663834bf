//! Type definitions and aliases

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Disguise operations measured by the benchmark harness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Account creation
    CreateAccount,
    /// Anonymize an account (a disguise)
    Anonymize,
    /// Edit public (non-anonymized) data
    Edit,
    /// Edit data after anonymization
    EditAnonymized,
    /// Delete an account (a disguise)
    Delete,
    /// Delete an account that was never anonymized
    DeleteNoAnon,
    /// Restore a deleted account (reverse a disguise)
    Restore,
    /// Restore a deleted account that was never anonymized
    RestoreNoAnon,
    /// Decay an account (a disguise)
    Decay,
    /// Restore a decayed account
    Undecay,
}

impl Operation {
    /// Label used for chart groups and report rows
    pub fn label(&self) -> &'static str {
        match self {
            Operation::CreateAccount => "Create Account",
            Operation::Anonymize => "Anonymize Account",
            Operation::Edit => "Edit Public Data",
            Operation::EditAnonymized => "Edit Anonymized Data",
            Operation::Delete => "Delete Account",
            Operation::DeleteNoAnon => "Delete Account (no anon)",
            Operation::Restore => "Restore Deleted Account",
            Operation::RestoreNoAnon => "Restore Deleted Account (no anon)",
            Operation::Decay => "Decay Account",
            Operation::Undecay => "Restore Decayed Account",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which system produced a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemKind {
    /// Measurement taken without the privacy system (manual queries)
    Baseline,
    /// Measurement taken through the disguising system
    Disguised,
}

impl SystemKind {
    /// Legend label for charts and reports
    pub fn label(&self) -> &'static str {
        match self {
            SystemKind::Baseline => "Manual (baseline)",
            SystemKind::Disguised => "Disguised",
        }
    }
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Time units understood by the ingest and chart layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Microseconds (the harness's native unit)
    Micros,
    /// Milliseconds (the unit every figure is labeled in)
    Millis,
    /// Seconds
    Seconds,
}

impl TimeUnit {
    /// Number of microseconds in one unit
    pub fn micros_per_unit(&self) -> f64 {
        match self {
            TimeUnit::Micros => 1.0,
            TimeUnit::Millis => 1_000.0,
            TimeUnit::Seconds => 1_000_000.0,
        }
    }

    /// Convert a value expressed in microseconds into this unit
    pub fn from_micros(&self, micros: f64) -> f64 {
        micros / self.micros_per_unit()
    }

    /// Axis label suffix
    pub fn suffix(&self) -> &'static str {
        match self {
            TimeUnit::Micros => "us",
            TimeUnit::Millis => "ms",
            TimeUnit::Seconds => "s",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "us" | "micros" | "microseconds" => Ok(TimeUnit::Micros),
            "ms" | "millis" | "milliseconds" => Ok(TimeUnit::Millis),
            "s" | "sec" | "seconds" => Ok(TimeUnit::Seconds),
            _ => Err(AppError::validation(format!("Unknown time unit: {}", s))),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// Output image formats supported by the chart renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    /// Vector output via the SVG backend
    Svg,
    /// Bitmap output via the PNG backend
    Png,
}

impl ImageFormat {
    /// Infer the format from an output path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("svg") => Ok(ImageFormat::Svg),
            Some("png") => Ok(ImageFormat::Png),
            Some(other) => Err(AppError::validation(format!(
                "Unsupported output format '.{}' (expected .svg or .png)",
                other
            ))),
            None => Err(AppError::validation(format!(
                "Output path '{}' has no extension (expected .svg or .png)",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_operation_labels() {
        assert_eq!(Operation::CreateAccount.label(), "Create Account");
        assert_eq!(Operation::Undecay.label(), "Restore Decayed Account");
        assert_eq!(Operation::Delete.to_string(), "Delete Account");
    }

    #[test]
    fn test_time_unit_conversion() {
        assert_eq!(TimeUnit::Millis.from_micros(1500.0), 1.5);
        assert_eq!(TimeUnit::Seconds.from_micros(2_000_000.0), 2.0);
        assert_eq!(TimeUnit::Micros.from_micros(42.0), 42.0);
    }

    #[test]
    fn test_time_unit_from_str() {
        assert_eq!("ms".parse::<TimeUnit>().unwrap(), TimeUnit::Millis);
        assert_eq!("Micros".parse::<TimeUnit>().unwrap(), TimeUnit::Micros);
        assert!("lightyears".parse::<TimeUnit>().is_err());
    }

    #[test]
    fn test_image_format_from_path() {
        assert_eq!(
            ImageFormat::from_path(&PathBuf::from("fig.svg")).unwrap(),
            ImageFormat::Svg
        );
        assert_eq!(
            ImageFormat::from_path(&PathBuf::from("out/op_stats.PNG")).unwrap(),
            ImageFormat::Png
        );
        assert!(ImageFormat::from_path(&PathBuf::from("fig.pdf")).is_err());
        assert!(ImageFormat::from_path(&PathBuf::from("figure")).is_err());
    }
}
