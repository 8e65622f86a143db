//! Score aggregation and rating

use crate::report::{EvaluationResults, Rate, ScoreSummary};

/// Highest score the rule table can award
pub const MAX_SCORE: u32 = 405;

impl Rate {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=120 => Rate::Bad,
            121..=220 => Rate::Sufficient,
            221..=350 => Rate::Good,
            351..=MAX_SCORE => Rate::Excellent,
            _ => Rate::Error,
        }
    }
}

/// Sum every weight in the result set and rate the total
pub fn summarize(results: &EvaluationResults) -> ScoreSummary {
    let score = results.weights().sum();
    ScoreSummary {
        score,
        rate: Rate::from_score(score),
    }
}
