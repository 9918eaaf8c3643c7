use itertools::Itertools;

use crate::core::domain::{CaseResult, RunReport, ScoreSummary, Verdict};

/// Builds the report for a finished batch.
///
/// Only succeeded cases contribute to the score summary; any other state
/// only turns the verdict into `WA`.
pub fn aggregate(details: Vec<CaseResult>) -> RunReport {
    let verdict = if details.iter().all(|r| r.state.is_success()) {
        Verdict::Accepted
    } else {
        Verdict::WrongAnswer
    };

    let scores = details
        .iter()
        .filter(|r| r.state.is_success())
        .map(|r| r.score)
        .sorted_by(f64::total_cmp)
        .collect_vec();

    RunReport {
        verdict,
        timestamp: chrono::Local::now(),
        score_summary: summarize(&scores),
        details,
    }
}

fn summarize(sorted_scores: &[f64]) -> ScoreSummary {
    let (Some(min), Some(max)) = (sorted_scores.first(), sorted_scores.last()) else {
        return ScoreSummary::default();
    };

    let sum: f64 = sorted_scores.iter().sum();
    ScoreSummary {
        average: sum / sorted_scores.len() as f64,
        sum,
        min: *min,
        max: *max,
    }
}
