//! Report Data Structures

use bindbench_core::{ArtifactInfo, Workload};
use bindbench_stats::{AggregateStatistics, ComparisonResult, Recommendation, Scoreboard};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current layout version of serialized reports
pub const SCHEMA_VERSION: u32 = 1;

/// Metric id under which artifact sizes are compared
pub const ARTIFACT_SIZE_METRIC: &str = "artifact_size";

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl ReportMeta {
    /// Metadata stamped now with the running tool version
    pub fn now(version: &str) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            version: version.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// System information
///
/// Fields missing from a results file default to empty or zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemInfo {
    pub os: String,
    pub os_version: String,
    pub arch: String,
    /// Processor model
    #[serde(alias = "processor")]
    pub cpu: String,
    #[serde(alias = "cpu_count")]
    pub cpu_cores: u32,
    pub memory_gb: f64,
}

/// Aggregate of one scenario plus the size of its input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Statistics of the batch (flattened into the scenario object)
    #[serde(flatten)]
    pub stats: AggregateStatistics,
    /// Points in the workload, for mesh scenarios
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_vertices: Option<usize>,
    /// Triangles in the workload, for mesh scenarios
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_faces: Option<usize>,
}

impl ScenarioResult {
    /// Scenario without an associated input mesh
    pub fn new(stats: AggregateStatistics) -> Self {
        Self {
            stats,
            input_vertices: None,
            input_faces: None,
        }
    }

    /// Record the size of the workload the scenario ran on
    pub fn with_input(mut self, workload: &Workload) -> Self {
        self.input_vertices = Some(workload.vertex_count());
        self.input_faces = Some(workload.face_count());
        self
    }
}

/// Everything measured for one binding variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantResults {
    /// Variant name (e.g. "pybind11")
    pub variant: String,
    pub timestamp: DateTime<Utc>,
    pub system_info: SystemInfo,
    /// Scenario id -> result; scenarios that did not run are absent
    pub benchmarks: BTreeMap<String, ScenarioResult>,
    /// Built distributable, when one was found
    #[serde(default, alias = "wheel_info")]
    pub artifact: Option<ArtifactInfo>,
}

impl VariantResults {
    /// Empty result set stamped now
    pub fn new(variant: &str, system_info: SystemInfo) -> Self {
        Self {
            variant: variant.to_string(),
            timestamp: Utc::now(),
            system_info,
            benchmarks: BTreeMap::new(),
            artifact: None,
        }
    }

    /// Aggregate of a scenario, if it ran
    pub fn stats(&self, scenario: &str) -> Option<&AggregateStatistics> {
        self.benchmarks.get(scenario).map(|r| &r.stats)
    }

    /// Ids of scenarios in which every trial failed
    pub fn failed_scenarios(&self) -> Vec<&str> {
        self.benchmarks
            .iter()
            .filter(|(_, r)| r.stats.is_all_failed())
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

/// Baseline vs candidate comparison with the final verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub meta: ReportMeta,
    pub baseline: VariantResults,
    pub candidate: VariantResults,
    /// One entry per compared metric, in catalog order
    pub comparisons: Vec<ComparisonResult>,
    pub scoreboard: Scoreboard,
    /// Scoreboard keyed by variant name
    pub scores: BTreeMap<String, u32>,
    pub recommendation: Recommendation,
}

impl ComparisonReport {
    /// Comparison of one metric
    pub fn comparison(&self, metric: &str) -> Option<&ComparisonResult> {
        self.comparisons.iter().find(|c| c.metric.name == metric)
    }

    /// Number of metrics that feed the scoreboard
    pub fn scored_metrics(&self) -> usize {
        self.comparisons.iter().filter(|c| c.metric.scored).count()
    }

    /// (variant, scenario) pairs in which every trial failed
    pub fn failed_scenarios(&self) -> Vec<(&str, &str)> {
        [&self.baseline, &self.candidate]
            .into_iter()
            .flat_map(|v| {
                v.failed_scenarios()
                    .into_iter()
                    .map(move |s| (v.variant.as_str(), s))
            })
            .collect()
    }
}
