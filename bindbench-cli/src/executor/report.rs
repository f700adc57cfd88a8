//! Report Building
//!
//! Turns two variants' results into a `ComparisonReport`.
//!
//! ## Pipeline
//!
//! ```text
//! VariantResults (baseline) + VariantResults (candidate)
//!              │
//!              ▼
//!   ┌─────────────────────┐
//!   │  compare_optional   │  one ComparisonResult per catalog metric
//!   └──────────┬──────────┘
//!              │
//!              ▼
//!   ┌─────────────────────┐
//!   │     recommend       │  scored metrics only
//!   └──────────┬──────────┘
//!              │
//!              ▼
//!   ┌─────────────────────┐
//!   │  ComparisonReport   │  Ready for JSON/Markdown/human output
//!   └─────────────────────┘
//! ```

use super::scenario::metric_catalog;
use bindbench_report::{ARTIFACT_SIZE_METRIC, ComparisonReport, ReportMeta, VariantResults};
use bindbench_stats::{AggregateStatistics, compare_optional, recommend};
use tracing::info;

/// Compare every catalog metric and reduce the verdicts to a recommendation
///
/// Scenarios missing from either side, all-failed scenarios and missing
/// artifacts make their metric unavailable; it is still listed. Only scored
/// metrics reach the scoreboard. The two variant names must differ, since
/// they key `scores`.
pub fn build_comparison(baseline: &VariantResults, candidate: &VariantResults) -> ComparisonReport {
    let comparisons: Vec<_> = metric_catalog()
        .iter()
        .map(|metric| {
            if metric.name == ARTIFACT_SIZE_METRIC {
                let baseline_size = artifact_size(baseline);
                let candidate_size = artifact_size(candidate);
                compare_optional(metric, baseline_size.as_ref(), candidate_size.as_ref())
            } else {
                compare_optional(
                    metric,
                    baseline.stats(&metric.name),
                    candidate.stats(&metric.name),
                )
            }
        })
        .collect();

    let (scoreboard, recommendation) = recommend(comparisons.iter().filter(|c| c.metric.scored));
    info!(
        baseline = scoreboard.baseline,
        candidate = scoreboard.candidate,
        %recommendation,
        "comparison complete"
    );

    ComparisonReport {
        meta: ReportMeta::now(env!("CARGO_PKG_VERSION")),
        scores: scoreboard.labeled(&baseline.variant, &candidate.variant),
        baseline: baseline.clone(),
        candidate: candidate.clone(),
        comparisons,
        scoreboard,
        recommendation,
    }
}

fn artifact_size(results: &VariantResults) -> Option<AggregateStatistics> {
    results
        .artifact
        .as_ref()
        .map(|a| AggregateStatistics::single(a.size_mb))
}
