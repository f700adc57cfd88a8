//! Suite Executor
//!
//! Runs the scenario catalog against both variants and turns the results into
//! a comparison report.
//!
//! ## Pipeline Overview
//!
//! ```text
//! BindingVariant (baseline)   BindingVariant (candidate)
//!       │                            │
//!       ▼                            ▼
//! ┌─────────────┐             ┌─────────────┐
//! │  execution  │             │  execution  │  Trials + aggregates per scenario
//! └──────┬──────┘             └──────┬──────┘
//!        └─────────────┬─────────────┘
//!                      ▼
//!               ┌─────────────┐
//!               │   report    │  Comparisons, scoreboard, recommendation
//!               └──────┬──────┘
//!                      ▼
//!               ┌─────────────┐
//!               │ formatting  │  Human-readable output
//!               └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`scenario`] - Scenario catalog and compared metrics
//! - [`execution`] - Sequential suite execution for one variant
//! - [`report`] - Comparison building
//! - [`formatting`] - Human-readable output formatting
//! - [`metadata`] - System metadata collection

mod execution;
mod formatting;
mod metadata;
mod report;
mod scenario;

// Re-export public API
pub use execution::{ExecutionConfig, SuiteRunner};
pub use formatting::format_human_output;
pub use metadata::collect_system_info;
pub use report::build_comparison;
pub use scenario::{Scenario, artifact_metric, metric_catalog};
