#![warn(missing_docs)]
//! BindBench Core - Trial Runtime
//!
//! This crate provides the measurement side of a binding comparison:
//! - `Timer` for wall-clock timing around a single call
//! - `run_trials` / `run_import_trials` for failure-tolerant trial batches
//! - Deterministic workload generators (tetrahedron, subdivided cube)
//! - The `BindingVariant` interface each implementation under test provides

mod binding;
mod measure;
mod trial;
mod workload;

pub use binding::{
    ArtifactInfo, BindingError, BindingVariant, ModuleRegistry, RemeshOutput, find_latest_artifact,
};
pub use measure::{Timer, duration_to_ms, pin_to_cpu};
pub use trial::{TrialRecord, run_import_trials, run_trials};
pub use workload::{
    MINIMAL_TARGET_VERTICES, STRUCTURED_TARGET_VERTICES, Workload, minimal_workload,
    structured_workload,
};
