//! Integration tests for BindBench
//!
//! These tests verify the end-to-end behavior of the comparison engine, from
//! trial execution through the rendered report.

use bindbench::prelude::*;
use bindbench::{
    AggregateStatistics, ExecutionConfig, Recommendation, SuiteRunner, VariantsConfig, Verdict,
    aggregate, build_comparison, generate_json_report, generate_markdown_report,
    load_comparison_report, load_variant_results, minimal_workload, run_comparison,
    run_import_trials, run_trials, structured_workload,
};
use std::cell::Cell;
use std::time::Duration;

/// Variant with configurable per-call cost and failure behavior
struct ScriptedVariant {
    name: &'static str,
    loaded: bool,
    evictions: usize,
    import_cost: Duration,
    call_cost: Duration,
    fail_every: Option<usize>,
    panic_on_call: bool,
    calls: Cell<usize>,
    artifact_mb: Option<f64>,
}

impl ScriptedVariant {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            loaded: false,
            evictions: 0,
            import_cost: Duration::ZERO,
            call_cost: Duration::ZERO,
            fail_every: None,
            panic_on_call: false,
            calls: Cell::new(0),
            artifact_mb: None,
        }
    }
}

impl ModuleRegistry for ScriptedVariant {
    fn evict(&mut self) {
        self.loaded = false;
        self.evictions += 1;
    }

    fn import(&mut self) -> Result<(), BindingError> {
        if !self.import_cost.is_zero() {
            std::thread::sleep(self.import_cost);
        }
        self.loaded = true;
        Ok(())
    }
}

impl BindingVariant for ScriptedVariant {
    fn name(&self) -> &str {
        self.name
    }

    fn remesh(&self, workload: &Workload) -> Result<RemeshOutput, BindingError> {
        let call = self.calls.get() + 1;
        self.calls.set(call);

        if self.panic_on_call {
            panic!("native code aborted");
        }
        if self.fail_every.is_some_and(|n| call % n == 0) {
            return Err(BindingError::Remesh(format!("call {} rejected", call)));
        }
        if !self.call_cost.is_zero() {
            std::thread::sleep(self.call_cost);
        }
        Ok(RemeshOutput {
            points: workload.points().to_vec(),
            triangles: workload.triangles().to_vec(),
        })
    }

    fn artifact(&self) -> Option<ArtifactInfo> {
        self.artifact_mb.map(|size_mb| ArtifactInfo {
            filename: format!("{}-0.1.0.whl", self.name),
            size_mb,
        })
    }
}

fn small_runner() -> SuiteRunner {
    SuiteRunner::new(ExecutionConfig {
        import_iterations: 4,
        call_iterations: 20,
        end_to_end_iterations: 3,
        subdivisions: 2,
        ..ExecutionConfig::default()
    })
    .quiet()
}

/// Always-succeeding callable yields N successes
#[test]
fn test_always_succeeding_callable() {
    let records = run_trials(
        |w: &Workload| Ok::<_, BindingError>(w.vertex_count()),
        &minimal_workload(),
        25,
    );
    assert_eq!(records.len(), 25);
    assert!(records.iter().all(|r| r.is_success()));

    let stats = aggregate(&records);
    assert_eq!(stats.successes(), 25);
}

/// Always-failing callable yields N failures and an all-failed aggregate
#[test]
fn test_always_failing_callable() {
    let records = run_trials(
        |_: &Workload| Err::<(), _>(BindingError::Remesh("boom".to_string())),
        &minimal_workload(),
        7,
    );
    assert_eq!(records.len(), 7);
    assert!(records.iter().all(|r| !r.is_success()));

    let stats = aggregate(&records);
    assert!(stats.is_all_failed());
    assert!(stats.summary().is_none());
}

/// Every import trial is preceded by an eviction
#[test]
fn test_import_trials_evict_each_time() {
    let mut variant = ScriptedVariant::new("a");
    let records = run_import_trials(&mut variant, 6);

    assert_eq!(records.len(), 6);
    assert_eq!(variant.evictions, 6);
    assert!(variant.loaded);
}

/// A panicking call is recorded as a failure instead of aborting the batch
#[test]
fn test_panicking_variant_is_contained() {
    let mut baseline = ScriptedVariant::new("stable");
    let mut candidate = ScriptedVariant::new("crashy");
    candidate.panic_on_call = true;

    let report = run_comparison(
        &small_runner(),
        &mut baseline,
        &mut candidate,
        &VariantsConfig::default(),
    )
    .unwrap();

    let call = report.comparison("call_overhead").unwrap();
    assert!(!call.is_available());
    match call.candidate.as_ref().unwrap() {
        AggregateStatistics::AllFailed(failed) => {
            assert_eq!(failed.attempted, 20);
            assert!(failed.first_failure.as_deref().unwrap().contains("native code aborted"));
        }
        other => panic!("expected all-failed, got {:?}", other),
    }
    assert_eq!(
        report.failed_scenarios(),
        vec![("crashy", "call_overhead"), ("crashy", "end_to_end")]
    );
    // Import time still compares
    assert!(report.comparison("import_time").unwrap().is_available());
}

/// Partial failures only shrink the sample
#[test]
fn test_partial_failures_shrink_sample() {
    let mut variant = ScriptedVariant::new("flaky");
    variant.fail_every = Some(4);

    let results = small_runner().run(&mut variant);
    assert_eq!(results.stats("call_overhead").unwrap().successes(), 15);
}

/// Full pipeline: slower baseline, smaller candidate wheel
#[test]
fn test_full_comparison_prefers_candidate() {
    let mut baseline = ScriptedVariant::new("pybind11");
    baseline.import_cost = Duration::from_millis(4);
    baseline.call_cost = Duration::from_millis(3);
    baseline.artifact_mb = Some(1.2);

    let mut candidate = ScriptedVariant::new("nanobind");
    candidate.import_cost = Duration::from_micros(500);
    candidate.call_cost = Duration::from_micros(300);
    candidate.artifact_mb = Some(0.4);

    let report = run_comparison(
        &small_runner(),
        &mut baseline,
        &mut candidate,
        &VariantsConfig::default(),
    )
    .unwrap();

    assert_eq!(report.comparison("import_time").unwrap().verdict, Verdict::CandidateBetter);
    assert_eq!(report.comparison("end_to_end").unwrap().verdict, Verdict::CandidateBetter);
    assert_eq!(report.comparison("artifact_size").unwrap().verdict, Verdict::CandidateBetter);
    assert_eq!(report.scoreboard.candidate, 3);
    assert_eq!(report.scoreboard.baseline, 0);
    assert_eq!(report.recommendation, Recommendation::CandidatePreferred);

    let e2e = &report.candidate.benchmarks["end_to_end"];
    assert_eq!(e2e.input_vertices, Some(27));
    assert_eq!(e2e.input_faces, Some(32));

    let md = generate_markdown_report(&report);
    assert!(md.contains("RECOMMENDED: Migrate to nanobind"));
    assert!(md.contains("| nanobind | nanobind-0.1.0.whl | 0.40 |"));
}

/// Variants reporting the same name must be renamed through config
#[test]
fn test_duplicate_names_rejected() {
    let mut a = ScriptedVariant::new("same");
    let mut b = ScriptedVariant::new("same");

    assert!(run_comparison(&small_runner(), &mut a, &mut b, &VariantsConfig::default()).is_err());

    let names = VariantsConfig {
        baseline: Some("before".to_string()),
        candidate: Some("after".to_string()),
    };
    let report = run_comparison(&small_runner(), &mut a, &mut b, &names).unwrap();
    assert_eq!(report.baseline.variant, "before");
    assert_eq!(report.scores["after"], report.scoreboard.candidate);
}

/// Saved results rebuild the same comparison
#[test]
fn test_saved_results_rebuild_comparison() {
    let dir = tempfile::tempdir().unwrap();
    let runner = small_runner();

    let mut baseline = ScriptedVariant::new("pybind11");
    baseline.artifact_mb = Some(1.0);
    let mut candidate = ScriptedVariant::new("nanobind");
    candidate.artifact_mb = Some(1.0);

    let baseline_results = runner.run(&mut baseline);
    let candidate_results = runner.run(&mut candidate);

    let baseline_path = dir.path().join("pybind11_results.json");
    let candidate_path = dir.path().join("nanobind_results.json");
    std::fs::write(&baseline_path, generate_json_report(&baseline_results).unwrap()).unwrap();
    std::fs::write(&candidate_path, generate_json_report(&candidate_results).unwrap()).unwrap();

    let original = build_comparison(&baseline_results, &candidate_results);
    let rebuilt = build_comparison(
        &load_variant_results(&baseline_path).unwrap(),
        &load_variant_results(&candidate_path).unwrap(),
    );
    let verdicts = |r: &bindbench::ComparisonReport| -> Vec<(String, Verdict)> {
        r.comparisons
            .iter()
            .map(|c| (c.metric.name.clone(), c.verdict))
            .collect()
    };
    assert_eq!(verdicts(&original), verdicts(&rebuilt));
    assert_eq!(rebuilt.baseline.benchmarks.len(), 3);
    assert_eq!(original.recommendation, rebuilt.recommendation);

    let comparison_path = dir.path().join("comparison.json");
    std::fs::write(&comparison_path, generate_json_report(&rebuilt).unwrap()).unwrap();
    let loaded = load_comparison_report(&comparison_path).unwrap();
    assert_eq!(loaded.scoreboard, rebuilt.scoreboard);
    assert_eq!(loaded.comparisons.len(), 4);
}

/// JSON field names of aggregates and comparisons
#[test]
fn test_json_layout() {
    let mut baseline = ScriptedVariant::new("a");
    let mut candidate = ScriptedVariant::new("b");
    candidate.panic_on_call = true;

    let report = run_comparison(
        &small_runner(),
        &mut baseline,
        &mut candidate,
        &VariantsConfig::default(),
    )
    .unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&generate_json_report(&report).unwrap()).unwrap();

    let import = &json["baseline"]["benchmarks"]["import_time"];
    for field in ["mean_ms", "std_ms", "min_ms", "max_ms", "iterations"] {
        assert!(import.get(field).is_some(), "missing {}", field);
    }
    assert_eq!(
        json["candidate"]["benchmarks"]["call_overhead"]["error"],
        "All iterations failed"
    );

    let comparisons = json["comparisons"].as_array().unwrap();
    let call = comparisons
        .iter()
        .find(|c| c["metric"]["name"] == "call_overhead")
        .unwrap();
    assert!(call["diff"].is_null());
    assert!(call["pct"].is_null());
    assert_eq!(call["verdict"], "equivalent");
}

/// Structured workload is deterministic and sized as documented
#[test]
fn test_structured_workload_shape() {
    let a = structured_workload(3);
    let b = structured_workload(3);
    assert_eq!(a, b);
    assert_eq!(a.vertex_count(), 64);
    assert_eq!(a.face_count(), 108);
    assert!(a.deterministic());
    assert!(a.is_well_formed());
}

/// Regex filter keeps only matching scenarios
#[test]
fn test_filtered_run() {
    let runner = small_runner().with_filter(regex::Regex::new("import").unwrap());
    let mut variant = ScriptedVariant::new("a");
    let results = runner.run(&mut variant);

    assert_eq!(results.benchmarks.len(), 1);
    assert_eq!(variant.calls.get(), 0);
}
