#![warn(missing_docs)]
//! BindBench CLI Library
//!
//! This module provides the CLI infrastructure for comparison binaries.
//! Implement `BindingVariant` for both implementations and hand them to
//! `bindbench::run()` (or `bindbench_cli::run()`) in your main function.
//!
//! # Example
//!
//! ```ignore
//! use bindbench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     bindbench::run(Box::new(Pybind11::new()), Box::new(Nanobind::new()))
//! }
//! ```

mod config;
mod executor;

pub use config::*;
pub use executor::{
    ExecutionConfig, Scenario, SuiteRunner, artifact_metric, build_comparison,
    collect_system_info, format_human_output, metric_catalog,
};

use anyhow::Context;
use bindbench_core::{BindingVariant, structured_workload};
use bindbench_report::{
    ComparisonReport, OutputFormat, VariantResults, generate_json_report,
    generate_markdown_report, load_comparison_report, load_variant_results, write_json_report,
};
use clap::{Parser, Subcommand};
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the comparison written next to the per-variant results
pub const COMPARISON_FILE_NAME: &str = "comparison.json";

/// BindBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "bindbench")]
#[command(author, version, about = "BindBench - compare two binding variants of the same API")]
pub struct Cli {
    /// Optional subcommand (Run, Compare, Report, List); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Run only scenarios whose id matches this regex
    #[arg(long, global = true)]
    pub filter: Option<String>,

    /// Output format: human, json, markdown
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Directory for per-variant results and the comparison
    #[arg(long, global = true)]
    pub results_dir: Option<PathBuf>,

    /// Number of timed imports
    #[arg(long, global = true)]
    pub import_iterations: Option<usize>,

    /// Number of call-overhead trials
    #[arg(long, global = true)]
    pub call_iterations: Option<usize>,

    /// Number of end-to-end trials
    #[arg(long, global = true)]
    pub end_to_end_iterations: Option<usize>,

    /// Cells per axis of the end-to-end cube
    #[arg(long, global = true)]
    pub subdivisions: Option<usize>,

    /// Pin the measuring thread to this core
    #[arg(long, global = true)]
    pub pin_cpu: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the suite against both variants and compare them (default)
    Run,
    /// Compare two saved variant result files
    Compare {
        /// Results of the reference variant
        #[arg(name = "BASELINE")]
        baseline: PathBuf,
        /// Results of the variant under evaluation
        #[arg(name = "CANDIDATE")]
        candidate: PathBuf,
    },
    /// Re-render a saved comparison
    Report {
        /// Comparison JSON written by `run` or `compare`
        #[arg(name = "COMPARISON")]
        comparison: PathBuf,
    },
    /// List the scenario catalog
    List,
}

/// Run the BindBench CLI with the given variants.
/// This is the main entry point for comparison binaries.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong. Exits the
/// process with status 1 when a scenario failed every iteration.
pub fn run(
    baseline: Box<dyn BindingVariant>,
    candidate: Box<dyn BindingVariant>,
) -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli, baseline, candidate)
}

/// Run the BindBench CLI with pre-parsed arguments.
pub fn run_with_cli(
    cli: Cli,
    mut baseline: Box<dyn BindingVariant>,
    mut candidate: Box<dyn BindingVariant>,
) -> anyhow::Result<()> {
    // Initialize logging
    let filter = if cli.verbose {
        "bindbench=debug"
    } else {
        "bindbench=info"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    // Discover bindbench.toml configuration (CLI flags override)
    let config = BenchConfig::discover().unwrap_or_default();
    let format = resolve_format(&cli, &config)?;

    let succeeded = match cli.command.clone().unwrap_or(Commands::Run) {
        Commands::List => {
            list_scenarios(&cli, &config)?;
            true
        }
        Commands::Run => run_suite(
            &cli,
            &config,
            format,
            baseline.as_mut(),
            candidate.as_mut(),
        )?,
        Commands::Compare {
            baseline: baseline_path,
            candidate: candidate_path,
        } => compare_saved(&cli, &config, format, &baseline_path, &candidate_path)?,
        Commands::Report { comparison } => {
            let report = load_comparison_report(&comparison)?;
            emit(&render(&report, format)?, cli.output.as_deref())?;
            true
        }
    };

    if !succeeded {
        std::process::exit(1);
    }

    Ok(())
}

/// Run both variants through `runner` and compare them
///
/// Names from `names` replace what the variants report. The two names must
/// differ: they key the saved files and the score table.
pub fn run_comparison(
    runner: &SuiteRunner,
    baseline: &mut dyn BindingVariant,
    candidate: &mut dyn BindingVariant,
    names: &VariantsConfig,
) -> anyhow::Result<ComparisonReport> {
    let (baseline_name, candidate_name) = resolve_names(names, baseline.name(), candidate.name())?;

    let mut baseline_results = runner.run(baseline);
    baseline_results.variant = baseline_name;
    let mut candidate_results = runner.run(candidate);
    candidate_results.variant = candidate_name;

    Ok(build_comparison(&baseline_results, &candidate_results))
}

/// Apply `[variants]` overrides and require two distinct names
fn resolve_names(
    names: &VariantsConfig,
    baseline: &str,
    candidate: &str,
) -> anyhow::Result<(String, String)> {
    let baseline = names.baseline.as_deref().unwrap_or(baseline).to_string();
    let candidate = names.candidate.as_deref().unwrap_or(candidate).to_string();
    if baseline == candidate {
        anyhow::bail!(
            "baseline and candidate are both named '{}'; set [variants] names in {}",
            baseline,
            CONFIG_FILE_NAME
        );
    }
    Ok((baseline, candidate))
}

/// Build an ExecutionConfig by layering: bindbench.toml defaults → CLI overrides.
fn build_execution_config(cli: &Cli, config: &BenchConfig) -> ExecutionConfig {
    let defaults = ExecutionConfig::from(&config.runner);

    ExecutionConfig {
        import_iterations: cli.import_iterations.unwrap_or(defaults.import_iterations),
        call_iterations: cli.call_iterations.unwrap_or(defaults.call_iterations),
        end_to_end_iterations: cli
            .end_to_end_iterations
            .unwrap_or(defaults.end_to_end_iterations),
        subdivisions: cli.subdivisions.unwrap_or(defaults.subdivisions),
        pin_cpu: cli.pin_cpu.or(defaults.pin_cpu),
        ..defaults
    }
}

fn build_runner(cli: &Cli, config: &BenchConfig) -> anyhow::Result<SuiteRunner> {
    let runner = SuiteRunner::new(build_execution_config(cli, config));
    match &cli.filter {
        Some(pattern) => {
            let filter = Regex::new(pattern)
                .with_context(|| format!("invalid scenario filter '{}'", pattern))?;
            Ok(runner.with_filter(filter))
        }
        None => Ok(runner),
    }
}

fn resolve_format(cli: &Cli, config: &BenchConfig) -> anyhow::Result<OutputFormat> {
    cli.format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(anyhow::Error::msg)
}

fn results_dir(cli: &Cli, config: &BenchConfig) -> PathBuf {
    cli.results_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.directory))
}

fn results_path(dir: &Path, results: &VariantResults) -> PathBuf {
    dir.join(format!("{}_results.json", results.variant))
}

fn list_scenarios(cli: &Cli, config: &BenchConfig) -> anyhow::Result<()> {
    let runner = build_runner(cli, config)?;
    let exec = runner.config();
    let selected = runner.scenarios();

    println!("BindBench Plan:");
    for scenario in Scenario::ALL {
        let detail = match scenario {
            Scenario::ImportTime => format!("{} iterations", exec.import_iterations),
            Scenario::CallOverhead => format!(
                "{} iterations, tetrahedron, target {}",
                exec.call_iterations, exec.call_target
            ),
            Scenario::EndToEnd => {
                let workload = structured_workload(exec.subdivisions);
                format!(
                    "{} iterations, {n}x{n}x{n} cube ({} vertices, {} triangles), target {}",
                    exec.end_to_end_iterations,
                    workload.vertex_count(),
                    workload.face_count(),
                    exec.end_to_end_target,
                    n = exec.subdivisions
                )
            }
        };
        let scored = if scenario.metric().scored {
            ""
        } else {
            " [not scored]"
        };
        let skipped = if selected.contains(&scenario) {
            ""
        } else {
            " [filtered out]"
        };
        println!(
            "├── {}: {} ({}){}{}",
            scenario.id(),
            scenario.label(),
            detail,
            scored,
            skipped
        );
    }
    let artifact = artifact_metric();
    println!("└── {}: {} (newest artifact)", artifact.name, artifact.label);
    println!("{} of {} scenarios selected.", selected.len(), Scenario::ALL.len());

    Ok(())
}

fn run_suite(
    cli: &Cli,
    config: &BenchConfig,
    format: OutputFormat,
    baseline: &mut dyn BindingVariant,
    candidate: &mut dyn BindingVariant,
) -> anyhow::Result<bool> {
    let runner = build_runner(cli, config)?;
    let scenarios = runner.scenarios();
    if scenarios.is_empty() {
        println!("No scenarios match the filter.");
        return Ok(true);
    }

    eprintln!(
        "Running {} scenario(s) against {} and {}...\n",
        scenarios.len(),
        baseline.name(),
        candidate.name()
    );

    let report = run_comparison(&runner, baseline, candidate, &config.variants)?;

    let dir = results_dir(cli, config);
    for results in [&report.baseline, &report.candidate] {
        let path = results_path(&dir, results);
        write_json_report(results, &path)
            .with_context(|| format!("saving results of {}", results.variant))?;
        eprintln!("Results saved to: {}", path.display());
    }
    let comparison_path = dir.join(COMPARISON_FILE_NAME);
    write_json_report(&report, &comparison_path).context("saving comparison")?;
    eprintln!("Comparison saved to: {}", comparison_path.display());

    emit(&render(&report, format)?, cli.output.as_deref())?;
    Ok(check_failures(&report))
}

fn compare_saved(
    cli: &Cli,
    config: &BenchConfig,
    format: OutputFormat,
    baseline_path: &Path,
    candidate_path: &Path,
) -> anyhow::Result<bool> {
    let mut baseline = load_variant_results(baseline_path)?;
    let mut candidate = load_variant_results(candidate_path)?;
    (baseline.variant, candidate.variant) =
        resolve_names(&config.variants, &baseline.variant, &candidate.variant)?;

    eprintln!(
        "Comparing {} ({}) against {} ({})\n",
        candidate.variant,
        candidate_path.display(),
        baseline.variant,
        baseline_path.display()
    );

    let report = build_comparison(&baseline, &candidate);
    let comparison_path = results_dir(cli, config).join(COMPARISON_FILE_NAME);
    write_json_report(&report, &comparison_path).context("saving comparison")?;

    emit(&render(&report, format)?, cli.output.as_deref())?;
    Ok(check_failures(&report))
}

/// Render a report in the requested format
pub fn render(report: &ComparisonReport, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => generate_json_report(report)?,
        OutputFormat::Markdown => generate_markdown_report(report),
        OutputFormat::Human => format_human_output(report),
    })
}

fn emit(output: &str, path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = path {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }
    Ok(())
}

/// Report all-failed scenarios on stderr; `false` if there were any
fn check_failures(report: &ComparisonReport) -> bool {
    let failed = report.failed_scenarios();
    for (variant, scenario) in &failed {
        eprintln!("\n{} / {}: all iterations failed", variant, scenario);
    }
    failed.is_empty()
}
