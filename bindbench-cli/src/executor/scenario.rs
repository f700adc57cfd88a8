//! Scenario Catalog
//!
//! The fixed set of measurements every variant goes through. Scenario ids are
//! the keys of `VariantResults::benchmarks` and the metric names of the
//! resulting comparisons.

use bindbench_report::ARTIFACT_SIZE_METRIC;
use bindbench_stats::Metric;

/// One named benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Latency of a cold module import
    ImportTime,
    /// Fixed cost of one call on a tiny input
    CallOverhead,
    /// Full call on a moderately sized mesh
    EndToEnd,
}

impl Scenario {
    /// Catalog order
    pub const ALL: [Scenario; 3] = [
        Scenario::ImportTime,
        Scenario::CallOverhead,
        Scenario::EndToEnd,
    ];

    /// Stable identifier
    pub fn id(self) -> &'static str {
        match self {
            Scenario::ImportTime => "import_time",
            Scenario::CallOverhead => "call_overhead",
            Scenario::EndToEnd => "end_to_end",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Scenario::ImportTime => "Import Time",
            Scenario::CallOverhead => "Function Call Overhead",
            Scenario::EndToEnd => "End-to-End Performance",
        }
    }

    /// What the scenario measures
    pub fn description(self) -> &'static str {
        match self {
            Scenario::ImportTime => {
                "Time to import the module, with the module cache evicted before each import."
            }
            Scenario::CallOverhead => {
                "Time per call on a minimal mesh (tetrahedron), dominated by binding overhead."
            }
            Scenario::EndToEnd => {
                "Full remeshing of a subdivided cube, dominated by the algorithm itself."
            }
        }
    }

    /// Comparison metric of this scenario
    ///
    /// Call overhead is reported but does not feed the scoreboard.
    pub fn metric(self) -> Metric {
        let metric = Metric::lower_is_better(self.id(), self.label(), "ms")
            .with_description(self.description())
            .with_improvement("faster");
        match self {
            Scenario::CallOverhead => metric.unscored(),
            Scenario::ImportTime | Scenario::EndToEnd => metric,
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Comparison metric of the built artifact size
pub fn artifact_metric() -> Metric {
    Metric::lower_is_better(ARTIFACT_SIZE_METRIC, "Binary Size", "MB")
        .with_description("Size of the most recently built distributable package.")
        .with_improvement("smaller")
}

/// Every compared metric, in report order
pub fn metric_catalog() -> Vec<Metric> {
    Scenario::ALL
        .into_iter()
        .map(Scenario::metric)
        .chain(std::iter::once(artifact_metric()))
        .collect()
}
