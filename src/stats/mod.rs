//! Descriptive statistics over latency samples
//!
//! Everything in here is reduction: mean, median, percentiles, standard
//! deviation, error bars, time buckets, CDFs. No modeling, no significance
//! testing.

use crate::models::TimedSample;
use crate::types::{AppError, Result, TimeUnit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Descriptive statistics for one latency sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of samples
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Median (p50)
    pub median: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// 5th percentile
    pub p5: f64,
    /// 25th percentile
    pub p25: f64,
    /// 75th percentile
    pub p75: f64,
    /// 90th percentile
    pub p90: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
}

impl SummaryStats {
    /// Compute statistics over raw samples.
    ///
    /// The sample unit is whatever the caller put in; every field is in
    /// the same unit. Empty samples and non-finite values are errors.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(AppError::statistics(
                "Cannot summarize an empty sample",
            ));
        }

        if let Some(bad) = samples.iter().find(|v| !v.is_finite()) {
            return Err(AppError::statistics(format!(
                "Sample contains a non-finite value: {}",
                bad
            )));
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;

        Ok(Self {
            count,
            mean,
            median: percentile(&sorted, 50.0),
            std_dev: std_deviation(&sorted, mean),
            min: sorted[0],
            max: sorted[count - 1],
            p5: percentile(&sorted, 5.0),
            p25: percentile(&sorted, 25.0),
            p75: percentile(&sorted, 75.0),
            p90: percentile(&sorted, 90.0),
            p95: percentile(&sorted, 95.0),
            p99: percentile(&sorted, 99.0),
        })
    }

    /// Error bars around the median: lower = median - p5, upper = p95 - median
    pub fn error_bars(&self) -> ErrorBars {
        ErrorBars {
            lower: (self.median - self.p5).max(0.0),
            upper: (self.p95 - self.median).max(0.0),
        }
    }

    /// Coefficient of variation (std_dev / mean); 0 when the mean is 0
    pub fn dispersion(&self) -> f64 {
        if self.mean > 0.0 {
            self.std_dev / self.mean
        } else {
            0.0
        }
    }

    /// A copy with every value field converted from microseconds into `unit`
    pub fn in_unit(&self, unit: TimeUnit) -> SummaryStats {
        let scale = |v: f64| unit.from_micros(v);
        SummaryStats {
            count: self.count,
            mean: scale(self.mean),
            median: scale(self.median),
            std_dev: scale(self.std_dev),
            min: scale(self.min),
            max: scale(self.max),
            p5: scale(self.p5),
            p25: scale(self.p25),
            p75: scale(self.p75),
            p90: scale(self.p90),
            p95: scale(self.p95),
            p99: scale(self.p99),
        }
    }
}

/// Asymmetric error bars around a median
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorBars {
    /// Distance from the median down to the 5th percentile
    pub lower: f64,
    /// Distance from the median up to the 95th percentile
    pub upper: f64,
}

/// Relative overhead of a treatment versus a baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overhead {
    /// treatment median / baseline median
    pub ratio: f64,
    /// (ratio - 1) * 100
    pub percent: f64,
}

impl Overhead {
    /// Median-based overhead of `treatment` relative to `baseline`
    pub fn versus(treatment: &SummaryStats, baseline: &SummaryStats) -> Result<Self> {
        if baseline.median <= 0.0 {
            return Err(AppError::statistics(
                "Baseline median is zero; overhead is undefined",
            ));
        }
        let ratio = treatment.median / baseline.median;
        Ok(Self {
            ratio,
            percent: (ratio - 1.0) * 100.0,
        })
    }
}

/// One time bucket of a concurrent benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketPoint {
    /// Bucket start offset in milliseconds
    pub start_ms: f64,
    /// Mean latency of the bucket's samples, in microseconds
    pub mean_us: f64,
    /// Number of samples in the bucket
    pub count: usize,
}

/// Group timed samples into fixed-width buckets and average each bucket.
///
/// Returns bucket points sorted by offset. Buckets with no samples are
/// simply absent.
pub fn bucketize(samples: &[TimedSample], bucket_width_ms: f64) -> Result<Vec<BucketPoint>> {
    if !bucket_width_ms.is_finite() || bucket_width_ms <= 0.0 {
        return Err(AppError::statistics(format!(
            "Bucket width must be positive (got {})",
            bucket_width_ms
        )));
    }

    let mut buckets: BTreeMap<u64, (f64, usize)> = BTreeMap::new();
    for sample in samples {
        let bucket = (sample.offset_ms / bucket_width_ms).floor() as u64;
        let entry = buckets.entry(bucket).or_insert((0.0, 0));
        entry.0 += sample.latency_us;
        entry.1 += 1;
    }

    Ok(buckets
        .into_iter()
        .map(|(bucket, (sum, count))| BucketPoint {
            start_ms: bucket as f64 * bucket_width_ms,
            mean_us: sum / count as f64,
            count,
        })
        .collect())
}

/// Empirical CDF: (value, cumulative fraction) pairs sorted by value
pub fn cdf(samples: &[f64]) -> Vec<(f64, f64)> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len() as f64;
    sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| (x, (i + 1) as f64 / n))
        .collect()
}

/// Interpolated percentile of an ascending-sorted slice.
///
/// Matches the linear interpolation the summary statistics use; callers
/// must sort first.
pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let index = (p / 100.0) * (sorted_values.len() as f64 - 1.0);
    let lower_index = index.floor() as usize;
    let upper_index = index.ceil() as usize;

    if lower_index == upper_index {
        sorted_values[lower_index]
    } else {
        let lower_value = sorted_values[lower_index];
        let upper_value = sorted_values[upper_index.min(sorted_values.len() - 1)];
        let weight = index - lower_index as f64;
        lower_value + weight * (upper_value - lower_value)
    }
}

/// Count outliers outside 1.5 * IQR of the quartiles
pub fn iqr_outliers(values: &[f64]) -> usize {
    if values.len() < 4 {
        return 0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = percentile(&sorted, 25.0);
    let q3 = percentile(&sorted, 75.0);
    let iqr = q3 - q1;

    let lower_bound = q1 - 1.5 * iqr;
    let upper_bound = q3 + 1.5 * iqr;

    values
        .iter()
        .filter(|&&x| x < lower_bound || x > upper_bound)
        .count()
}

/// Sample standard deviation around a precomputed mean
fn std_deviation(values: &[f64], mean: f64) -> f64 {
    if values.len() <= 1 {
        return 0.0;
    }

    let variance = values
        .iter()
        .map(|x| (x - mean).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;

    variance.sqrt()
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn summary_bounds_hold(samples in prop::collection::vec(0.0f64..1e9, 1..200)) {
            let stats = SummaryStats::from_samples(&samples).unwrap();
            // The mean accumulates rounding error, so allow a few ulps.
            let eps = stats.max.abs() * 1e-12;
            prop_assert!(stats.min <= stats.median);
            prop_assert!(stats.median <= stats.max);
            prop_assert!(stats.min - eps <= stats.mean && stats.mean <= stats.max + eps);
            prop_assert!(stats.p5 <= stats.p95);
            prop_assert!(stats.std_dev >= 0.0);
        }

        #[test]
        fn percentiles_are_monotonic(samples in prop::collection::vec(0.0f64..1e9, 1..200)) {
            let mut sorted = samples.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let p25 = percentile(&sorted, 25.0);
            let p50 = percentile(&sorted, 50.0);
            let p75 = percentile(&sorted, 75.0);
            prop_assert!(p25 <= p50 && p50 <= p75);
        }

        #[test]
        fn cdf_is_monotonic(samples in prop::collection::vec(0.0f64..1e9, 1..100)) {
            let points = cdf(&samples);
            for pair in points.windows(2) {
                prop_assert!(pair[0].0 <= pair[1].0);
                prop_assert!(pair[0].1 <= pair[1].1);
            }
            prop_assert!((points.last().unwrap().1 - 1.0).abs() < 1e-9);
        }
    }
}
