//! Suite Execution
//!
//! Runs the scenario catalog against one binding variant and collects the
//! aggregates into `VariantResults`.
//!
//! ## Data Flow
//!
//! ```text
//! BindingVariant + ExecutionConfig
//!        │
//!        ▼
//! ┌──────────────────┐
//! │   SuiteRunner    │  import_time → call_overhead → end_to_end
//! └────────┬─────────┘
//!          │  Vec<TrialRecord> per scenario
//!          ▼
//!      aggregate()
//!          │
//!          ▼
//!   VariantResults (+ artifact info)
//! ```
//!
//! Everything runs on the calling thread, one trial after another.

use super::metadata::collect_system_info;
use super::scenario::Scenario;
use crate::config::RunnerConfig;
use bindbench_core::{
    BindingVariant, minimal_workload, pin_to_cpu, run_import_trials, run_trials,
    structured_workload,
};
use bindbench_report::{ScenarioResult, VariantResults};
use bindbench_stats::aggregate;
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use tracing::{debug, info, warn};

/// Configuration for suite execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Import trials
    pub import_iterations: usize,
    /// Call-overhead trials
    pub call_iterations: usize,
    /// End-to-end trials
    pub end_to_end_iterations: usize,
    /// Cells per axis of the end-to-end cube
    pub subdivisions: usize,
    /// Target vertex count of the call-overhead workload
    pub call_target: usize,
    /// Target vertex count of the end-to-end workload
    pub end_to_end_target: usize,
    /// Core to pin the measuring thread to
    pub pin_cpu: Option<usize>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::from(&RunnerConfig::default())
    }
}

impl From<&RunnerConfig> for ExecutionConfig {
    fn from(runner: &RunnerConfig) -> Self {
        Self {
            import_iterations: runner.import_iterations,
            call_iterations: runner.call_iterations,
            end_to_end_iterations: runner.end_to_end_iterations,
            subdivisions: runner.subdivisions,
            call_target: runner.call_target,
            end_to_end_target: runner.end_to_end_target,
            pin_cpu: runner.pin_cpu,
        }
    }
}

/// Runs the scenario catalog against binding variants
pub struct SuiteRunner {
    config: ExecutionConfig,
    filter: Option<Regex>,
    show_progress: bool,
}

impl SuiteRunner {
    /// Runner over the whole catalog with a progress bar
    pub fn new(config: ExecutionConfig) -> Self {
        Self {
            config,
            filter: None,
            show_progress: true,
        }
    }

    /// Only run scenarios whose id matches `filter`
    pub fn with_filter(mut self, filter: Regex) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Suppress the progress bar
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Effective trial counts and workload sizes
    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Scenarios selected by the filter, in catalog order
    pub fn scenarios(&self) -> Vec<Scenario> {
        Scenario::ALL
            .into_iter()
            .filter(|s| self.filter.as_ref().is_none_or(|re| re.is_match(s.id())))
            .collect()
    }

    /// Measure every selected scenario for one variant
    pub fn run(&self, variant: &mut dyn BindingVariant) -> VariantResults {
        if let Some(cpu) = self.config.pin_cpu {
            match pin_to_cpu(cpu) {
                Ok(()) => debug!(cpu, "pinned measuring thread"),
                Err(e) => warn!(cpu, error = %e, "failed to pin measuring thread"),
            }
        }

        let scenarios = self.scenarios();
        let mut results = VariantResults::new(variant.name(), collect_system_info());
        info!(variant = variant.name(), scenarios = scenarios.len(), "running suite");

        let pb = if self.show_progress {
            ProgressBar::new(scenarios.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        for scenario in scenarios {
            pb.set_message(format!("{} {}", variant.name(), scenario.id()));
            let result = self.run_scenario(variant, scenario);

            match result.stats.summary() {
                Some(summary) => info!(
                    variant = variant.name(),
                    scenario = scenario.id(),
                    mean_ms = summary.mean_ms,
                    iterations = summary.iterations,
                    "scenario complete"
                ),
                None => warn!(
                    variant = variant.name(),
                    scenario = scenario.id(),
                    "all iterations failed"
                ),
            }

            results
                .benchmarks
                .insert(scenario.id().to_string(), result);
            pb.inc(1);
        }

        pb.finish_with_message(format!("{} complete", variant.name()));

        results.artifact = variant.artifact();
        if results.artifact.is_none() {
            debug!(variant = variant.name(), "no artifact found");
        }
        results
    }

    fn run_scenario(&self, variant: &mut dyn BindingVariant, scenario: Scenario) -> ScenarioResult {
        match scenario {
            Scenario::ImportTime => ScenarioResult::new(aggregate(&run_import_trials(
                variant,
                self.config.import_iterations,
            ))),
            Scenario::CallOverhead => {
                ensure_imported(variant);
                let workload = minimal_workload().with_target(self.config.call_target);
                let records = run_trials(
                    |w| variant.remesh(w),
                    &workload,
                    self.config.call_iterations,
                );
                ScenarioResult::new(aggregate(&records))
            }
            Scenario::EndToEnd => {
                ensure_imported(variant);
                let workload = structured_workload(self.config.subdivisions)
                    .with_target(self.config.end_to_end_target);
                let records = run_trials(
                    |w| variant.remesh(w),
                    &workload,
                    self.config.end_to_end_iterations,
                );
                ScenarioResult::new(aggregate(&records)).with_input(&workload)
            }
        }
    }
}

/// Load the module outside any timed region; a failure surfaces in the trials
fn ensure_imported(variant: &mut dyn BindingVariant) {
    if let Err(e) = variant.import() {
        warn!(variant = variant.name(), error = %e, "import before call trials failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindbench_core::{ArtifactInfo, BindingError, ModuleRegistry, RemeshOutput, Workload};

    /// Variant whose calls succeed or fail on demand
    struct FakeVariant {
        loaded: bool,
        imports: usize,
        fail_remesh: bool,
    }

    impl FakeVariant {
        fn new(fail_remesh: bool) -> Self {
            Self {
                loaded: false,
                imports: 0,
                fail_remesh,
            }
        }
    }

    impl ModuleRegistry for FakeVariant {
        fn evict(&mut self) {
            self.loaded = false;
        }

        fn import(&mut self) -> Result<(), BindingError> {
            self.imports += 1;
            self.loaded = true;
            Ok(())
        }
    }

    impl BindingVariant for FakeVariant {
        fn name(&self) -> &str {
            "fake"
        }

        fn remesh(&self, workload: &Workload) -> Result<RemeshOutput, BindingError> {
            if self.fail_remesh || !self.loaded {
                return Err(BindingError::Remesh("refused".to_string()));
            }
            Ok(RemeshOutput {
                points: workload.points().to_vec(),
                triangles: workload.triangles().to_vec(),
            })
        }

        fn artifact(&self) -> Option<ArtifactInfo> {
            Some(ArtifactInfo {
                filename: "fake.whl".to_string(),
                size_mb: 1.5,
            })
        }
    }

    fn small_config() -> ExecutionConfig {
        ExecutionConfig {
            import_iterations: 3,
            call_iterations: 5,
            end_to_end_iterations: 2,
            subdivisions: 2,
            ..ExecutionConfig::default()
        }
    }

    #[test]
    fn test_default_config_matches_runner_defaults() {
        let config = ExecutionConfig::default();
        assert_eq!(config.import_iterations, 50);
        assert_eq!(config.call_iterations, 1000);
        assert_eq!(config.end_to_end_iterations, 10);
        assert_eq!(config.subdivisions, 3);
    }

    #[test]
    fn test_runs_full_catalog() {
        let mut variant = FakeVariant::new(false);
        let results = SuiteRunner::new(small_config()).quiet().run(&mut variant);

        assert_eq!(results.variant, "fake");
        assert_eq!(results.benchmarks.len(), 3);
        assert_eq!(results.stats("import_time").unwrap().successes(), 3);
        assert_eq!(results.stats("call_overhead").unwrap().successes(), 5);

        let e2e = &results.benchmarks["end_to_end"];
        assert_eq!(e2e.stats.successes(), 2);
        assert_eq!(e2e.input_vertices, Some(27));
        assert_eq!(e2e.input_faces, Some(32));

        assert_eq!(results.artifact.unwrap().size_mb, 1.5);
        // 3 timed imports + one untimed import per call scenario
        assert_eq!(variant.imports, 5);
    }

    #[test]
    fn test_failing_calls_are_all_failed() {
        let mut variant = FakeVariant::new(true);
        let results = SuiteRunner::new(small_config()).quiet().run(&mut variant);

        assert!(!results.stats("import_time").unwrap().is_all_failed());
        assert!(results.stats("call_overhead").unwrap().is_all_failed());
        assert_eq!(results.failed_scenarios(), vec!["call_overhead", "end_to_end"]);
    }

    #[test]
    fn test_filter_skips_scenarios() {
        let runner = SuiteRunner::new(small_config())
            .quiet()
            .with_filter(Regex::new("^(import|end)").unwrap());
        assert_eq!(
            runner.scenarios(),
            vec![Scenario::ImportTime, Scenario::EndToEnd]
        );

        let results = runner.run(&mut FakeVariant::new(false));
        assert!(results.stats("call_overhead").is_none());
        assert!(results.stats("end_to_end").is_some());
    }
}
