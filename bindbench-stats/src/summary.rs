//! Aggregate Statistics
//!
//! Reduces a batch of trial records to descriptive statistics in milliseconds.
//! - Only successful trials contribute
//! - Standard deviation is the population form (divide by N)
//! - A batch without a single success is an explicit `AllFailed` state,
//!   never a zero-filled summary

use bindbench_core::{TrialRecord, duration_to_ms};
use serde::{Deserialize, Serialize};

/// Error text stored in an all-failed aggregate
pub const ALL_FAILED_MESSAGE: &str = "All iterations failed";

/// Descriptive statistics of the successful trials of one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    /// Arithmetic mean
    pub mean_ms: f64,
    /// Population standard deviation
    pub std_ms: f64,
    /// Fastest trial
    pub min_ms: f64,
    /// Slowest trial
    pub max_ms: f64,
    /// Number of successful trials
    pub iterations: usize,
}

/// Marker for a batch in which every trial failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedBatch {
    /// Always [`ALL_FAILED_MESSAGE`]
    pub error: String,
    /// Number of trials attempted
    pub attempted: usize,
    /// Reason recorded by the first failed trial
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_failure: Option<String>,
}

/// Summary of one (variant, scenario) batch
///
/// Callers must branch on [`AggregateStatistics::AllFailed`] before reading
/// central tendency; [`AggregateStatistics::mean`] panics on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AggregateStatistics {
    /// At least one trial succeeded
    Measured(TrialSummary),
    /// No trial succeeded
    AllFailed(FailedBatch),
}

impl AggregateStatistics {
    /// Wrap a one-shot measurement (e.g. artifact size) as a count-1 aggregate
    pub fn single(value: f64) -> Self {
        AggregateStatistics::Measured(TrialSummary {
            mean_ms: value,
            std_ms: 0.0,
            min_ms: value,
            max_ms: value,
            iterations: 1,
        })
    }

    /// Whether every trial failed
    pub fn is_all_failed(&self) -> bool {
        matches!(self, AggregateStatistics::AllFailed(_))
    }

    /// Statistics, if any trial succeeded
    pub fn summary(&self) -> Option<&TrialSummary> {
        match self {
            AggregateStatistics::Measured(summary) => Some(summary),
            AggregateStatistics::AllFailed(_) => None,
        }
    }

    /// Mean of the successful trials
    ///
    /// # Panics
    ///
    /// Panics on an all-failed aggregate; there is no mean to report.
    pub fn mean(&self) -> f64 {
        match self {
            AggregateStatistics::Measured(summary) => summary.mean_ms,
            AggregateStatistics::AllFailed(failed) => panic!(
                "mean requested from an all-failed aggregate ({} attempted)",
                failed.attempted
            ),
        }
    }

    /// Number of successful trials (0 when all failed)
    pub fn successes(&self) -> usize {
        self.summary().map_or(0, |s| s.iterations)
    }
}

/// Aggregate a batch of trial records
pub fn aggregate(records: &[TrialRecord]) -> AggregateStatistics {
    let durations: Vec<f64> = records
        .iter()
        .filter_map(TrialRecord::duration)
        .map(duration_to_ms)
        .collect();

    match summarize_ms(&durations) {
        Some(summary) => AggregateStatistics::Measured(summary),
        None => AggregateStatistics::AllFailed(FailedBatch {
            error: ALL_FAILED_MESSAGE.to_string(),
            attempted: records.len(),
            first_failure: records
                .iter()
                .find_map(|r| r.failure_reason())
                .map(str::to_string),
        }),
    }
}

/// Descriptive statistics of raw millisecond samples (`None` when empty)
pub fn summarize_ms(samples: &[f64]) -> Option<TrialSummary> {
    if samples.is_empty() {
        return None;
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(TrialSummary {
        mean_ms: mean,
        std_ms: variance.sqrt(),
        min_ms: min,
        max_ms: max,
        iterations: samples.len(),
    })
}
