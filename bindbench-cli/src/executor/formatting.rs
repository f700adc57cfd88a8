//! Output Formatting
//!
//! Human-readable output formatting for comparison reports.
//!
//! Generates terminal-friendly output with:
//! - One block per metric with both variants' mean and spread
//! - Signed difference and a verdict marker (✅ / ⚠️ / ≈)
//! - All-failed and missing data called out explicitly
//! - Final scoreboard and recommendation

use bindbench_report::{ComparisonReport, format_difference};
use bindbench_stats::{AggregateStatistics, ComparisonResult, Recommendation, Verdict};

/// Format a report for human-readable terminal display
pub fn format_human_output(report: &ComparisonReport) -> String {
    let baseline = report.baseline.variant.as_str();
    let candidate = report.candidate.variant.as_str();
    let width = baseline.len().max(candidate.len()).max(10);
    let mut output = String::new();

    output.push('\n');
    output.push_str(&format!("BindBench Comparison: {} vs {}\n", baseline, candidate));
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for cmp in &report.comparisons {
        let scored = if cmp.metric.scored { "" } else { " [not scored]" };
        output.push_str(&format!(
            "{} ({}){}\n",
            cmp.metric.label, cmp.metric.unit, scored
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        output.push_str(&format_side(baseline, cmp.baseline.as_ref(), width));
        output.push_str(&format_side(candidate, cmp.candidate.as_ref(), width));

        if cmp.is_available() {
            output.push_str(&format!(
                "  {:<width$}  {}  {}\n",
                "difference",
                format_difference(cmp),
                verdict_marker(cmp, baseline, candidate),
                width = width
            ));
        } else {
            output.push_str(&format!("  {} data not available\n", cmp.metric.label));
        }
        output.push('\n');
    }

    // Summary
    output.push_str("Summary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Score: {} {} - {} {}\n",
        baseline, report.scoreboard.baseline, report.scoreboard.candidate, candidate
    ));
    let recommendation = match report.recommendation {
        Recommendation::CandidatePreferred => format!("migrate to {}", candidate),
        Recommendation::BaselinePreferred => format!("keep {}", baseline),
        Recommendation::Neutral => "either option is viable".to_string(),
    };
    output.push_str(&format!(
        "  Recommendation: {} ({})\n",
        recommendation, report.recommendation
    ));

    let failed = report.failed_scenarios();
    if !failed.is_empty() {
        output.push_str("\n  All iterations failed:\n");
        for (variant, scenario) in failed {
            output.push_str(&format!("    ✗ {} / {}\n", variant, scenario));
        }
    }

    output
}

fn format_side(name: &str, stats: Option<&AggregateStatistics>, width: usize) -> String {
    match stats {
        Some(AggregateStatistics::Measured(s)) => format!(
            "  {:<width$}  {:.4} ± {:.4}  (min {:.4}, max {:.4}, n={})\n",
            name,
            s.mean_ms,
            s.std_ms,
            s.min_ms,
            s.max_ms,
            s.iterations,
            width = width
        ),
        Some(AggregateStatistics::AllFailed(f)) => {
            let reason = f
                .first_failure
                .as_deref()
                .map(|r| format!(": {}", r))
                .unwrap_or_default();
            format!(
                "  {:<width$}  ✗ {} ({} attempted){}\n",
                name,
                f.error,
                f.attempted,
                reason,
                width = width
            )
        }
        None => format!("  {:<width$}  -\n", name, width = width),
    }
}

fn verdict_marker(cmp: &ComparisonResult, baseline: &str, candidate: &str) -> String {
    match cmp.verdict {
        Verdict::CandidateBetter => format!("✅ {} better", candidate),
        Verdict::BaselineBetter => format!("⚠️ {} better", baseline),
        Verdict::Equivalent => "≈ equivalent".to_string(),
    }
}
