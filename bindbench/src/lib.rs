#![warn(missing_docs)]
//! # BindBench
//!
//! Benchmark engine for deciding between two native-binding variants of the
//! same API (e.g. a pybind11 and a nanobind build of one extension module).
//!
//! BindBench measures both variants the same way and reduces the numbers to a
//! single recommendation:
//! - **Import latency**: module cache evicted before every timed import
//! - **Call overhead**: many calls on a four-vertex tetrahedron
//! - **End-to-end**: calls on a deterministic subdivided cube
//! - **Binary size**: newest built artifact of each variant
//! - **Failure tolerance**: failing or panicking trials are recorded, not fatal
//! - **Fixed threshold**: differences within 5% are equivalent
//!
//! ## Quick Start
//!
//! ```ignore
//! use bindbench::prelude::*;
//!
//! struct Pybind11 { /* handle to the extension module */ }
//!
//! impl ModuleRegistry for Pybind11 {
//!     fn evict(&mut self) { /* drop the cached module */ }
//!     fn import(&mut self) -> Result<(), BindingError> { Ok(()) }
//! }
//!
//! impl BindingVariant for Pybind11 {
//!     fn name(&self) -> &str { "pybind11" }
//!     fn remesh(&self, workload: &Workload) -> Result<RemeshOutput, BindingError> {
//!         todo!()
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     bindbench::run(Box::new(Pybind11 {}), Box::new(Nanobind {}))
//! }
//! ```

// Re-export core types
pub use bindbench_core::{
    ArtifactInfo, BindingError, BindingVariant, MINIMAL_TARGET_VERTICES, ModuleRegistry,
    RemeshOutput, STRUCTURED_TARGET_VERTICES, Timer, TrialRecord, Workload, find_latest_artifact,
    minimal_workload, run_import_trials, run_trials, structured_workload,
};

// Re-export stats
pub use bindbench_stats::{
    AggregateStatistics, ComparisonResult, Direction, EQUIVALENCE_THRESHOLD_PCT, Metric,
    Recommendation, Scoreboard, Verdict, aggregate, compare, recommend,
};

// Re-export reporting
pub use bindbench_report::{
    ComparisonReport, OutputFormat, ScenarioResult, SystemInfo, VariantResults,
    generate_json_report, generate_markdown_report, load_comparison_report, load_variant_results,
};

// Re-export the runner
pub use bindbench_cli::{
    BenchConfig, ExecutionConfig, Scenario, SuiteRunner, VariantsConfig, build_comparison,
    format_human_output, run_comparison,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ArtifactInfo, BindingError, BindingVariant, ModuleRegistry, RemeshOutput, Workload,
        find_latest_artifact,
    };
}

/// Run the BindBench CLI harness.
///
/// Call this from your comparison binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     bindbench::run(Box::new(Baseline::new()), Box::new(Candidate::new()))
/// }
/// ```
pub use bindbench_cli::run;
