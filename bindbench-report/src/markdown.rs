//! Markdown Output
//!
//! Renders a comparison report as a standalone Markdown document:
//! - System information of the measuring host
//! - One section per metric with a statistics table and a result line
//! - Binary size table
//! - Key findings and the final recommendation

use crate::report::{ARTIFACT_SIZE_METRIC, ComparisonReport};
use bindbench_stats::{
    AggregateStatistics, ComparisonResult, EQUIVALENCE_THRESHOLD_PCT, Recommendation, Verdict,
};

/// Generate a Markdown comparison document
pub fn generate_markdown_report(report: &ComparisonReport) -> String {
    let baseline = report.baseline.variant.as_str();
    let candidate = report.candidate.variant.as_str();
    let mut output = String::new();

    output.push_str(&format!(
        "# Binding Performance Comparison: {} vs {}\n\n",
        baseline, candidate
    ));
    output.push_str(&format!(
        "**Generated:** {}\n\n",
        report.meta.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    let system = &report.baseline.system_info;
    output.push_str("## System Information\n\n");
    output.push_str(&format!("- **OS:** {} {}\n", system.os, system.os_version));
    output.push_str(&format!("- **Architecture:** {}\n", system.arch));
    output.push_str(&format!(
        "- **CPU:** {} ({} cores)\n",
        system.cpu, system.cpu_cores
    ));
    output.push_str(&format!("- **Memory:** {:.1} GB\n\n", system.memory_gb));

    output.push_str("## Benchmark Results\n\n");
    for cmp in &report.comparisons {
        if cmp.metric.name == ARTIFACT_SIZE_METRIC {
            push_artifact_section(&mut output, report, cmp);
        } else {
            push_metric_section(&mut output, report, cmp);
        }
    }

    push_summary(&mut output, report);

    output.push_str("---\n\n");
    output.push_str(&format!(
        "*Generated by bindbench {}. Differences within ±{:.0}% are treated as equivalent.*\n",
        report.meta.version, EQUIVALENCE_THRESHOLD_PCT
    ));

    output
}

fn push_metric_section(output: &mut String, report: &ComparisonReport, cmp: &ComparisonResult) {
    let baseline = report.baseline.variant.as_str();
    let candidate = report.candidate.variant.as_str();
    let metric = &cmp.metric;

    output.push_str(&format!("### {}\n\n", metric.label));
    if !metric.description.is_empty() {
        output.push_str(&format!("{}\n\n", metric.description));
    }

    let (Some(b), Some(c)) = (
        cmp.baseline.as_ref().and_then(AggregateStatistics::summary),
        cmp.candidate.as_ref().and_then(AggregateStatistics::summary),
    ) else {
        push_unavailable(output, report, cmp);
        return;
    };

    output.push_str(&format!(
        "| Metric | {} | {} | Difference |\n",
        baseline, candidate
    ));
    output.push_str("|--------|------|------|------------|\n");
    output.push_str(&format!(
        "| Mean ({}) | {:.3} | {:.3} | {} |\n",
        metric.unit,
        b.mean_ms,
        c.mean_ms,
        format_difference(cmp)
    ));
    output.push_str(&format!(
        "| Std Dev ({}) | {:.3} | {:.3} | |\n",
        metric.unit, b.std_ms, c.std_ms
    ));
    output.push_str(&format!(
        "| Min ({}) | {:.3} | {:.3} | |\n",
        metric.unit, b.min_ms, c.min_ms
    ));
    output.push_str(&format!(
        "| Max ({}) | {:.3} | {:.3} | |\n",
        metric.unit, b.max_ms, c.max_ms
    ));
    output.push_str(&format!(
        "| Iterations | {} | {} | |\n",
        b.iterations, c.iterations
    ));

    let b_input = report.baseline.benchmarks.get(&metric.name);
    let c_input = report.candidate.benchmarks.get(&metric.name);
    let vertices = (
        b_input.and_then(|r| r.input_vertices),
        c_input.and_then(|r| r.input_vertices),
    );
    if let (Some(bv), Some(cv)) = vertices {
        output.push_str(&format!("| Input vertices | {} | {} | |\n", bv, cv));
    }
    let faces = (
        b_input.and_then(|r| r.input_faces),
        c_input.and_then(|r| r.input_faces),
    );
    if let (Some(bf), Some(cf)) = faces {
        output.push_str(&format!("| Input faces | {} | {} | |\n", bf, cf));
    }

    output.push('\n');
    output.push_str(&result_line(report, cmp));
    output.push_str("\n\n");
}

fn push_artifact_section(output: &mut String, report: &ComparisonReport, cmp: &ComparisonResult) {
    output.push_str(&format!("### {}\n\n", cmp.metric.label));
    if !cmp.metric.description.is_empty() {
        output.push_str(&format!("{}\n\n", cmp.metric.description));
    }

    if !cmp.is_available() {
        push_unavailable(output, report, cmp);
        return;
    }

    output.push_str(&format!(
        "| Implementation | Artifact | Size ({}) |\n",
        cmp.metric.unit
    ));
    output.push_str("|----------------|----------|------|\n");
    for variant in [&report.baseline, &report.candidate] {
        if let Some(artifact) = &variant.artifact {
            output.push_str(&format!(
                "| {} | {} | {:.2} |\n",
                variant.variant, artifact.filename, artifact.size_mb
            ));
        }
    }

    output.push('\n');
    output.push_str(&result_line(report, cmp));
    output.push_str("\n\n");
}

fn push_unavailable(output: &mut String, report: &ComparisonReport, cmp: &ComparisonResult) {
    output.push_str(&format!("*{} data not available*\n", cmp.metric.label));

    for (variant, stats) in [
        (&report.baseline, cmp.baseline.as_ref()),
        (&report.candidate, cmp.candidate.as_ref()),
    ] {
        if let Some(AggregateStatistics::AllFailed(failed)) = stats {
            output.push_str(&format!(
                "\n- {}: {} ({} attempted)",
                variant.variant, failed.error, failed.attempted
            ));
            if let Some(reason) = &failed.first_failure {
                output.push_str(&format!(", first error: `{}`", reason));
            }
            output.push('\n');
        }
    }
    output.push('\n');
}

fn push_summary(output: &mut String, report: &ComparisonReport) {
    let baseline = report.baseline.variant.as_str();
    let candidate = report.candidate.variant.as_str();

    output.push_str("## Summary\n\n");
    output.push_str("### Key Findings\n\n");
    for cmp in report.comparisons.iter().filter(|c| c.metric.scored) {
        let finding = if !cmp.is_available() {
            "N/A".to_string()
        } else {
            match cmp.verdict {
                Verdict::CandidateBetter => {
                    format!("{} is {}", candidate, cmp.metric.improvement_word())
                }
                Verdict::BaselineBetter => {
                    format!("{} is {}", baseline, cmp.metric.improvement_word())
                }
                Verdict::Equivalent => "equivalent".to_string(),
            }
        };
        output.push_str(&format!("- **{}:** {}\n", cmp.metric.label, finding));
    }
    output.push('\n');

    output.push_str("### Recommendation\n\n");
    output.push_str(&format!(
        "**Score:** {} {} - {} {}\n\n",
        baseline, report.scoreboard.baseline, report.scoreboard.candidate, candidate
    ));

    let scored = report.scored_metrics();
    match report.recommendation {
        Recommendation::CandidatePreferred => {
            output.push_str(&format!("**✅ RECOMMENDED: Migrate to {}**\n\n", candidate));
            output.push_str(&format!(
                "{} wins {} of {} scored metrics.\n\n",
                candidate, report.scoreboard.candidate, scored
            ));
        }
        Recommendation::BaselinePreferred => {
            output.push_str(&format!("**⚠️ RECOMMENDED: Keep {}**\n\n", baseline));
            output.push_str(&format!(
                "{} wins {} of {} scored metrics; migrating to {} is not justified by these results.\n\n",
                baseline, report.scoreboard.baseline, scored, candidate
            ));
        }
        Recommendation::Neutral => {
            output.push_str("**≈ NEUTRAL: Either option is viable**\n\n");
            output.push_str(
                "Neither variant wins more scored metrics. Decide on maintenance and build considerations.\n\n",
            );
        }
    }
}

fn result_line(report: &ComparisonReport, cmp: &ComparisonResult) -> String {
    let Some(pct) = cmp.pct else {
        return format!("*{} data not available*", cmp.metric.label);
    };

    match cmp.verdict {
        Verdict::CandidateBetter => format!(
            "**Result:** ✅ {} is **{:.1}% {}**",
            report.candidate.variant,
            pct.abs(),
            cmp.metric.improvement_word()
        ),
        Verdict::BaselineBetter => format!(
            "**Result:** ⚠️ {} is **{:.1}% {}**",
            report.baseline.variant,
            pct.abs(),
            cmp.metric.improvement_word()
        ),
        Verdict::Equivalent => format!(
            "**Result:** ≈ Equivalent (within {:.0}%)",
            EQUIVALENCE_THRESHOLD_PCT
        ),
    }
}

/// `+x.xxx (+y.y%)`, or `n/a` when the metric is unavailable
pub fn format_difference(cmp: &ComparisonResult) -> String {
    match (cmp.diff, cmp.pct) {
        (Some(diff), Some(pct)) => format!("{:+.3} ({:+.1}%)", diff, pct),
        _ => "n/a".to_string(),
    }
}
