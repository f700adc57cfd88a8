#![warn(missing_docs)]
//! BindBench Statistical Engine
//!
//! Turns trial batches into comparable numbers:
//! - Descriptive statistics (mean, population std, min, max, count)
//! - An explicit all-failed state instead of zero-filled statistics
//! - Baseline/candidate comparison with a fixed 5% equivalence threshold
//! - Scoreboard and overall recommendation

mod comparison;
mod scoring;
mod summary;

pub use comparison::{
    ComparisonResult, Direction, EQUIVALENCE_THRESHOLD_PCT, Metric, Verdict, classify, compare,
    compare_optional,
};
pub use scoring::{Recommendation, Scoreboard, Side, recommend};
pub use summary::{
    ALL_FAILED_MESSAGE, AggregateStatistics, FailedBatch, TrialSummary, aggregate, summarize_ms,
};
