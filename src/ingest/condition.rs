//! Experimental condition extraction from filenames
//!
//! The harness encoded every experiment's parameters in the result file
//! name, e.g. `disguise_stats_20lec_100users_batch.csv` or
//! `concurrent_disguise_stats_30users_expensive.csv`. Nothing inside the
//! file repeats this information, so the filename is the authoritative
//! source for the condition.

use crate::types::{AppError, Result, SystemKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Experimental condition under which a sample was collected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Application prefix (e.g. `hotcrp`, `lobsters`), if any
    pub app: Option<String>,

    /// Number of users in the experiment
    pub users: Option<u32>,

    /// Number of lectures (websubmit-style workloads)
    pub lectures: Option<u32>,

    /// Number of concurrent disguisers
    pub disguisers: Option<u32>,

    /// Whether disguise operations were batched
    pub batched: bool,

    /// Whether this is a baseline measurement (no disguising system)
    pub baseline: bool,
}

impl Condition {
    /// Extract the condition from a result file name
    pub fn from_filename(name: &str) -> Result<Self> {
        let users_re = compile(r"(\d+)users")?;
        let lectures_re = compile(r"(\d+)lec")?;
        let disguisers_re = compile(r"(\d+)(?:group|disguisers)")?;
        let app_re = compile(r"^([a-zA-Z]+)_disguise")?;

        let capture_u32 = |re: &Regex| -> Option<u32> {
            re.captures(name)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse().ok())
        };

        Ok(Self {
            // `concurrent_disguise_stats_*` files carry no app prefix.
            app: app_re
                .captures(name)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_lowercase())
                .filter(|app| app != "concurrent"),
            users: capture_u32(&users_re),
            lectures: capture_u32(&lectures_re),
            disguisers: capture_u32(&disguisers_re),
            batched: name.contains("batch") && !name.contains("no_batch"),
            baseline: name.contains("baseline"),
        })
    }

    /// Extract the condition from a path's file name
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                AppError::discovery(format!(
                    "Path '{}' has no usable file name",
                    path.display()
                ))
            })?;
        Self::from_filename(name)
    }

    /// Which system produced this measurement
    pub fn system(&self) -> SystemKind {
        if self.baseline {
            SystemKind::Baseline
        } else {
            SystemKind::Disguised
        }
    }

    /// Short human-readable label for legends and report rows
    pub fn label(&self) -> String {
        let mut parts = Vec::new();

        if let Some(app) = &self.app {
            parts.push(app.clone());
        }
        if let Some(users) = self.users {
            parts.push(format!("{} users", users));
        }
        if let Some(disguisers) = self.disguisers {
            parts.push(format!("{} disguisers", disguisers));
        }
        if self.batched {
            parts.push("batched".to_string());
        }
        if self.baseline {
            parts.push("baseline".to_string());
        }

        if parts.is_empty() {
            "unlabeled".to_string()
        } else {
            parts.join(", ")
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| AppError::internal(format!("Bad condition pattern '{}': {}", pattern, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_websubmit_batch_filename() {
        let cond =
            Condition::from_filename("disguise_stats_20lec_100users_batch.csv").unwrap();
        assert_eq!(cond.app, None);
        assert_eq!(cond.users, Some(100));
        assert_eq!(cond.lectures, Some(20));
        assert!(cond.batched);
        assert!(!cond.baseline);
        assert_eq!(cond.system(), SystemKind::Disguised);
    }

    #[test]
    fn test_hotcrp_baseline_filename() {
        let cond =
            Condition::from_filename("hotcrp_disguise_stats_3080users_baseline.csv").unwrap();
        assert_eq!(cond.app.as_deref(), Some("hotcrp"));
        assert_eq!(cond.users, Some(3080));
        assert!(cond.baseline);
        assert_eq!(cond.system(), SystemKind::Baseline);
    }

    #[test]
    fn test_concurrent_group_filename() {
        let cond = Condition::from_filename(
            "concurrent_disguise_stats_20lec_100users_disguising_25group_batch.csv",
        )
        .unwrap();
        assert_eq!(cond.app, None);
        assert_eq!(cond.disguisers, Some(25));
        assert_eq!(cond.users, Some(100));
        assert!(cond.batched);
    }

    #[test]
    fn test_label() {
        let cond =
            Condition::from_filename("disguise_stats_20lec_100users_batch.csv").unwrap();
        assert_eq!(cond.label(), "100 users, batched");

        let empty = Condition::from_filename("whatever.csv").unwrap();
        assert_eq!(empty.label(), "unlabeled");
    }

    #[test]
    fn test_from_path() {
        let cond = Condition::from_path(Path::new(
            "results/websubmit_results/disguise_stats_20lec_30users_baseline.csv",
        ))
        .unwrap();
        assert_eq!(cond.users, Some(30));
        assert!(cond.baseline);
    }
}
