//! Trial Executor
//!
//! Runs a callable a fixed number of times, timing only the call itself.
//! A failing trial (returned error or panic) is recorded and the batch goes on:
//! a batch of `n` iterations always yields exactly `n` records.

use crate::binding::ModuleRegistry;
use crate::measure::Timer;
use crate::workload::Workload;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of one timed invocation
#[derive(Debug, Clone, PartialEq)]
pub enum TrialRecord {
    /// The call returned normally
    Success {
        /// Wall-clock time spent in the call
        duration: Duration,
    },
    /// The call returned an error or panicked
    Failure {
        /// Description of the error
        reason: String,
    },
}

impl TrialRecord {
    /// Whether the trial succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, TrialRecord::Success { .. })
    }

    /// Measured duration of a successful trial
    pub fn duration(&self) -> Option<Duration> {
        match self {
            TrialRecord::Success { duration } => Some(*duration),
            TrialRecord::Failure { .. } => None,
        }
    }

    /// Failure description of a failed trial
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            TrialRecord::Success { .. } => None,
            TrialRecord::Failure { reason } => Some(reason),
        }
    }
}

/// Run `callable` on the same workload `iterations` times
///
/// Trials run strictly one after another on the calling thread. Setup is the
/// caller's business; only the call is inside the timed region.
pub fn run_trials<F, T, E>(
    mut callable: F,
    workload: &Workload,
    iterations: usize,
) -> Vec<TrialRecord>
where
    F: FnMut(&Workload) -> Result<T, E>,
    E: Display,
{
    let mut records = Vec::with_capacity(iterations);

    for iteration in 0..iterations {
        let record = measure_trial(|| callable(workload));
        log_failure(iteration, &record);
        records.push(record);
    }

    log_batch("call", &records);
    records
}

/// Run the import-latency sub-mode `iterations` times
///
/// The module is evicted before every trial (outside the timed region) so each
/// import pays the full initialization cost.
pub fn run_import_trials<M>(module: &mut M, iterations: usize) -> Vec<TrialRecord>
where
    M: ModuleRegistry + ?Sized,
{
    let mut records = Vec::with_capacity(iterations);

    for iteration in 0..iterations {
        module.evict();
        let record = measure_trial(|| module.import());
        log_failure(iteration, &record);
        records.push(record);
    }

    log_batch("import", &records);
    records
}

/// Time a single call and turn its outcome into a record
fn measure_trial<T, E, F>(f: F) -> TrialRecord
where
    F: FnOnce() -> Result<T, E>,
    E: Display,
{
    let timer = Timer::start();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| std::hint::black_box(f())));
    let duration = timer.stop();

    match outcome {
        Ok(Ok(_output)) => TrialRecord::Success { duration },
        Ok(Err(e)) => TrialRecord::Failure {
            reason: e.to_string(),
        },
        Err(panic) => TrialRecord::Failure {
            reason: panic_message(panic.as_ref()),
        },
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn log_failure(iteration: usize, record: &TrialRecord) {
    if let Some(reason) = record.failure_reason() {
        warn!(iteration, reason, "trial failed");
    }
}

fn log_batch(kind: &str, records: &[TrialRecord]) {
    let succeeded = records.iter().filter(|r| r.is_success()).count();
    debug!(
        kind,
        total = records.len(),
        succeeded,
        failed = records.len() - succeeded,
        "trial batch complete"
    );
}
