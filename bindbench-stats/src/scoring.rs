//! Scoreboard and Recommendation
//!
//! Pure reduction over comparison results: each decisive verdict on a scored
//! metric is one win for the winning side. The order of the input does not
//! matter.

use crate::comparison::{ComparisonResult, Verdict};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One side of the comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The reference variant
    Baseline,
    /// The variant under evaluation
    Candidate,
}

impl Verdict {
    /// Side that won this comparison, if any
    pub fn winner(self) -> Option<Side> {
        match self {
            Verdict::CandidateBetter => Some(Side::Candidate),
            Verdict::BaselineBetter => Some(Side::Baseline),
            Verdict::Equivalent => None,
        }
    }
}

/// Win counts per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Metrics won by the baseline
    pub baseline: u32,
    /// Metrics won by the candidate
    pub candidate: u32,
}

impl Scoreboard {
    /// Credit one win
    pub fn record(&mut self, side: Side) {
        match side {
            Side::Baseline => self.baseline += 1,
            Side::Candidate => self.candidate += 1,
        }
    }

    /// Wins of one side
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Baseline => self.baseline,
            Side::Candidate => self.candidate,
        }
    }

    /// Scores keyed by variant name
    pub fn labeled(&self, baseline_name: &str, candidate_name: &str) -> BTreeMap<String, u32> {
        let mut scores = BTreeMap::new();
        scores.insert(baseline_name.to_string(), self.baseline);
        scores.insert(candidate_name.to_string(), self.candidate);
        scores
    }

    /// Final category: strictly more wins is preferred, ties are neutral
    pub fn recommendation(&self) -> Recommendation {
        match self.candidate.cmp(&self.baseline) {
            std::cmp::Ordering::Greater => Recommendation::CandidatePreferred,
            std::cmp::Ordering::Less => Recommendation::BaselinePreferred,
            std::cmp::Ordering::Equal => Recommendation::Neutral,
        }
    }
}

/// Overall recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Keep the baseline
    BaselinePreferred,
    /// Switch to the candidate
    CandidatePreferred,
    /// Either variant is viable
    Neutral,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::BaselinePreferred => write!(f, "baseline preferred"),
            Recommendation::CandidatePreferred => write!(f, "candidate preferred"),
            Recommendation::Neutral => write!(f, "neutral"),
        }
    }
}

/// Tally comparison results into a scoreboard and recommendation
///
/// Every decisive verdict is one win. Equivalent verdicts, which include
/// unavailable comparisons, add nothing. Choosing which metrics take part is
/// up to the caller.
pub fn recommend<'a, I>(results: I) -> (Scoreboard, Recommendation)
where
    I: IntoIterator<Item = &'a ComparisonResult>,
{
    let mut scoreboard = Scoreboard::default();

    for result in results {
        if let Some(side) = result.verdict.winner() {
            scoreboard.record(side);
        }
    }

    (scoreboard, scoreboard.recommendation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::{Metric, compare, compare_optional};
    use crate::summary::AggregateStatistics;

    fn comparison(name: &str, baseline: f64, candidate: f64) -> ComparisonResult {
        compare(
            &Metric::lower_is_better(name, name, "ms"),
            &AggregateStatistics::single(baseline),
            &AggregateStatistics::single(candidate),
        )
    }

    #[test]
    fn test_candidate_preferred() {
        let results = vec![
            comparison("import_time", 100.0, 80.0), // candidate better
            comparison("end_to_end", 100.0, 50.0),  // candidate better
            comparison("artifact", 100.0, 120.0),   // baseline better
        ];

        let (scores, recommendation) = recommend(&results);
        assert_eq!(scores.candidate, 2);
        assert_eq!(scores.baseline, 1);
        assert_eq!(recommendation, Recommendation::CandidatePreferred);
        assert_eq!(recommendation.to_string(), "candidate preferred");
    }

    #[test]
    fn test_all_equivalent_is_neutral() {
        let results = vec![
            comparison("a", 100.0, 101.0),
            comparison("b", 100.0, 99.0),
            comparison("c", 100.0, 100.0),
        ];

        let (scores, recommendation) = recommend(&results);
        assert_eq!(scores, Scoreboard::default());
        assert_eq!(recommendation, Recommendation::Neutral);
    }

    #[test]
    fn test_empty_is_neutral() {
        let none: Vec<ComparisonResult> = Vec::new();
        let (scores, recommendation) = recommend(&none);
        assert_eq!(scores.baseline + scores.candidate, 0);
        assert_eq!(recommendation, Recommendation::Neutral);
    }

    #[test]
    fn test_tie_is_neutral() {
        let results = vec![comparison("a", 100.0, 50.0), comparison("b", 100.0, 150.0)];
        let (_, recommendation) = recommend(&results);
        assert_eq!(recommendation, Recommendation::Neutral);
    }

    #[test]
    fn test_baseline_preferred() {
        let results = vec![comparison("a", 100.0, 150.0)];
        let (scores, recommendation) = recommend(&results);
        assert_eq!(scores.score(Side::Baseline), 1);
        assert_eq!(recommendation, Recommendation::BaselinePreferred);
    }

    #[test]
    fn test_order_independent() {
        let mut results = vec![
            comparison("a", 100.0, 80.0),
            comparison("b", 100.0, 130.0),
            comparison("c", 100.0, 70.0),
            comparison("d", 100.0, 100.0),
        ];
        let forward = recommend(&results);
        results.reverse();
        let backward = recommend(&results);
        results.swap(0, 2);
        let shuffled = recommend(&results);

        assert_eq!(forward, backward);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_unscored_flag_is_callers_choice() {
        let call_overhead = compare(
            &Metric::lower_is_better("call_overhead", "Call Overhead", "ms").unscored(),
            &AggregateStatistics::single(100.0),
            &AggregateStatistics::single(50.0),
        );
        assert_eq!(call_overhead.verdict, Verdict::CandidateBetter);

        let (scores, recommendation) = recommend([&call_overhead]);
        assert_eq!(scores.candidate, 1);
        assert_eq!(recommendation, Recommendation::CandidatePreferred);
    }

    #[test]
    fn test_unavailable_ignored() {
        let missing = compare_optional(
            &Metric::lower_is_better("artifact_size", "Binary Size", "MB"),
            None,
            Some(&AggregateStatistics::single(1.0)),
        );

        let (scores, recommendation) = recommend([&missing]);
        assert_eq!(scores, Scoreboard::default());
        assert_eq!(recommendation, Recommendation::Neutral);
    }

    #[test]
    fn test_labeled_scores() {
        let scores = Scoreboard {
            baseline: 1,
            candidate: 2,
        };
        let labeled = scores.labeled("pybind11", "nanobind");
        assert_eq!(labeled["pybind11"], 1);
        assert_eq!(labeled["nanobind"], 2);
    }
}
