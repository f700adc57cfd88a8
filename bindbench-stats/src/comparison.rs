//! Baseline/Candidate Comparison
//!
//! Pairs two aggregates of the same metric and classifies the relative change
//! with a fixed, non-configurable threshold.

use crate::summary::AggregateStatistics;
use serde::{Deserialize, Serialize};

/// Relative change (percent) a variant must exceed to win a metric
pub const EQUIVALENCE_THRESHOLD_PCT: f64 = 5.0;

/// Which way a metric improves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Latency, size: smaller values win
    LowerIsBetter,
    /// Throughput: larger values win
    HigherIsBetter,
}

/// A compared quantity and its conventions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Stable identifier (e.g. "import_time")
    pub name: String,
    /// Human-readable label (e.g. "Import Time")
    pub label: String,
    /// Unit of the aggregate values (e.g. "ms", "MB")
    pub unit: String,
    /// Whether smaller or larger is better
    pub direction: Direction,
    /// Whether the verdict feeds the scoreboard
    pub scored: bool,
    /// One-line explanation for reports
    #[serde(default)]
    pub description: String,
    /// Word for the winning side in reports (e.g. "faster"); empty falls back
    /// to the direction
    #[serde(default)]
    pub improvement: String,
}

impl Metric {
    /// A scored metric where smaller values win
    pub fn lower_is_better(name: &str, label: &str, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            unit: unit.to_string(),
            direction: Direction::LowerIsBetter,
            scored: true,
            description: String::new(),
            improvement: String::new(),
        }
    }

    /// A scored metric where larger values win
    pub fn higher_is_better(name: &str, label: &str, unit: &str) -> Self {
        Self {
            direction: Direction::HigherIsBetter,
            ..Self::lower_is_better(name, label, unit)
        }
    }

    /// Report this metric without letting it affect the recommendation
    pub fn unscored(mut self) -> Self {
        self.scored = false;
        self
    }

    /// Attach a report description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Name how the winning side is better (e.g. "faster", "smaller")
    pub fn with_improvement(mut self, word: &str) -> Self {
        self.improvement = word.to_string();
        self
    }

    /// Word describing the winning side
    pub fn improvement_word(&self) -> &str {
        match (self.improvement.as_str(), self.direction) {
            ("", Direction::LowerIsBetter) => "lower",
            ("", Direction::HigherIsBetter) => "higher",
            (word, _) => word,
        }
    }
}

/// Categorical outcome of one comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The candidate wins by more than the threshold
    CandidateBetter,
    /// The baseline wins by more than the threshold
    BaselineBetter,
    /// Within the threshold, or not comparable
    Equivalent,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::CandidateBetter => write!(f, "candidate better"),
            Verdict::BaselineBetter => write!(f, "baseline better"),
            Verdict::Equivalent => write!(f, "equivalent"),
        }
    }
}

/// Result of comparing one metric across the two variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Metric compared
    pub metric: Metric,
    /// Baseline aggregate (absent when the baseline never measured it)
    pub baseline: Option<AggregateStatistics>,
    /// Candidate aggregate (absent when the candidate never measured it)
    pub candidate: Option<AggregateStatistics>,
    /// candidate mean - baseline mean
    pub diff: Option<f64>,
    /// diff relative to the baseline mean, in percent
    pub pct: Option<f64>,
    /// Classification of `pct`
    pub verdict: Verdict,
}

impl ComparisonResult {
    /// Whether both sides had data
    pub fn is_available(&self) -> bool {
        self.diff.is_some()
    }
}

/// Compare two aggregates of the same metric
pub fn compare(
    metric: &Metric,
    baseline: &AggregateStatistics,
    candidate: &AggregateStatistics,
) -> ComparisonResult {
    compare_optional(metric, Some(baseline), Some(candidate))
}

/// Compare two possibly-missing aggregates
///
/// A missing or all-failed side makes the metric unavailable: no diff, no
/// pct, verdict [`Verdict::Equivalent`].
pub fn compare_optional(
    metric: &Metric,
    baseline: Option<&AggregateStatistics>,
    candidate: Option<&AggregateStatistics>,
) -> ComparisonResult {
    let means = match (
        baseline.and_then(AggregateStatistics::summary),
        candidate.and_then(AggregateStatistics::summary),
    ) {
        (Some(b), Some(c)) => Some((b.mean_ms, c.mean_ms)),
        _ => None,
    };

    let (diff, pct, verdict) = match means {
        Some((baseline_mean, candidate_mean)) => {
            let diff = candidate_mean - baseline_mean;
            let pct = if baseline_mean > 0.0 {
                diff / baseline_mean * 100.0
            } else {
                0.0
            };
            (Some(diff), Some(pct), classify(pct, metric.direction))
        }
        None => (None, None, Verdict::Equivalent),
    };

    ComparisonResult {
        metric: metric.clone(),
        baseline: baseline.cloned(),
        candidate: candidate.cloned(),
        diff,
        pct,
        verdict,
    }
}

/// Classify a relative change; the threshold itself counts as equivalent
pub fn classify(pct: f64, direction: Direction) -> Verdict {
    let (improved, regressed) = match direction {
        Direction::LowerIsBetter => (
            pct < -EQUIVALENCE_THRESHOLD_PCT,
            pct > EQUIVALENCE_THRESHOLD_PCT,
        ),
        Direction::HigherIsBetter => (
            pct > EQUIVALENCE_THRESHOLD_PCT,
            pct < -EQUIVALENCE_THRESHOLD_PCT,
        ),
    };

    if improved {
        Verdict::CandidateBetter
    } else if regressed {
        Verdict::BaselineBetter
    } else {
        Verdict::Equivalent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::{FailedBatch, aggregate};

    fn latency() -> Metric {
        Metric::lower_is_better("end_to_end", "End-to-End", "ms")
    }

    fn mean(value: f64) -> AggregateStatistics {
        AggregateStatistics::single(value)
    }

    #[test]
    fn test_threshold_boundaries() {
        let metric = latency();

        let r = compare(&metric, &mean(100.0), &mean(94.9));
        assert!((r.pct.unwrap() + 5.1).abs() < 1e-9);
        assert_eq!(r.verdict, Verdict::CandidateBetter);

        let r = compare(&metric, &mean(100.0), &mean(95.1));
        assert!((r.pct.unwrap() + 4.9).abs() < 1e-9);
        assert_eq!(r.verdict, Verdict::Equivalent);

        let r = compare(&metric, &mean(100.0), &mean(95.0));
        assert_eq!(r.pct, Some(-5.0));
        assert_eq!(r.verdict, Verdict::Equivalent);

        let r = compare(&metric, &mean(100.0), &mean(105.0));
        assert_eq!(r.verdict, Verdict::Equivalent);

        let r = compare(&metric, &mean(100.0), &mean(105.1));
        assert_eq!(r.verdict, Verdict::BaselineBetter);
    }

    #[test]
    fn test_signed_difference() {
        let r = compare(&latency(), &mean(10.0), &mean(12.5));
        assert_eq!(r.diff, Some(2.5));
        assert_eq!(r.pct, Some(25.0));
        assert_eq!(r.verdict, Verdict::BaselineBetter);
        assert!(r.is_available());
    }

    #[test]
    fn test_zero_baseline() {
        let r = compare(&latency(), &mean(0.0), &mean(3.0));
        assert_eq!(r.diff, Some(3.0));
        assert_eq!(r.pct, Some(0.0));
        assert_eq!(r.verdict, Verdict::Equivalent);
    }

    #[test]
    fn test_higher_is_better_flips_sides() {
        let throughput = Metric::higher_is_better("throughput", "Throughput", "ops/s");

        let r = compare(&throughput, &mean(100.0), &mean(120.0));
        assert_eq!(r.verdict, Verdict::CandidateBetter);

        let r = compare(&throughput, &mean(100.0), &mean(80.0));
        assert_eq!(r.verdict, Verdict::BaselineBetter);

        let r = compare(&throughput, &mean(100.0), &mean(104.0));
        assert_eq!(r.verdict, Verdict::Equivalent);
    }

    #[test]
    fn test_all_failed_is_unavailable() {
        let failed = aggregate(&[bindbench_core::TrialRecord::Failure {
            reason: "nope".to_string(),
        }]);

        let r = compare(&latency(), &failed, &mean(1.0));
        assert!(!r.is_available());
        assert_eq!(r.pct, None);
        assert_eq!(r.verdict, Verdict::Equivalent);

        let r = compare(&latency(), &mean(1.0), &failed);
        assert!(!r.is_available());
        assert!(r.candidate.unwrap().is_all_failed());
    }

    #[test]
    fn test_missing_side_is_unavailable() {
        let r = compare_optional(&latency(), None, Some(&mean(1.0)));
        assert!(!r.is_available());
        assert_eq!(r.baseline, None);
        assert_eq!(r.verdict, Verdict::Equivalent);
    }

    #[test]
    fn test_unavailable_serializes_nulls() {
        let failed = AggregateStatistics::AllFailed(FailedBatch {
            error: "All iterations failed".to_string(),
            attempted: 3,
            first_failure: None,
        });
        let json = serde_json::to_value(compare(&latency(), &failed, &mean(1.0))).unwrap();
        assert!(json["diff"].is_null());
        assert!(json["pct"].is_null());
        assert_eq!(json["verdict"], "equivalent");
    }

    #[test]
    fn test_verdict_serialization() {
        let json = serde_json::to_value(Verdict::CandidateBetter).unwrap();
        assert_eq!(json, "candidate_better");
        assert_eq!(Verdict::BaselineBetter.to_string(), "baseline better");
    }

    #[test]
    fn test_unscored_metric() {
        let metric = latency().unscored();
        assert!(!metric.scored);
        assert_eq!(metric.direction, Direction::LowerIsBetter);
    }

    #[test]
    fn test_improvement_word() {
        assert_eq!(latency().improvement_word(), "lower");
        assert_eq!(latency().with_improvement("faster").improvement_word(), "faster");
        let throughput = Metric::higher_is_better("throughput", "Throughput", "ops/s");
        assert_eq!(throughput.improvement_word(), "higher");

        let json = r#"{"name":"x","label":"X","unit":"us","direction":"lower-is-better",
                       "scored":true}"#;
        let metric: Metric = serde_json::from_str(json).unwrap();
        assert_eq!(metric.improvement_word(), "lower");
    }
}
