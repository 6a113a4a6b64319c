// src/models/result.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::attempt::{QuestionOutcome, SubmitAttemptResponse};

/// Correct vs. total questions within one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub correct: u32,
    pub total: u32,
}

impl CategoryScore {
    /// Share of correct answers in percent, 0 for an empty category.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.correct) / f64::from(self.total) * 100.0
    }
}

/// Outcome of a submitted attempt, as graded by the backend.
///
/// Read-only once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedResult {
    /// 0 to 100.
    pub total_score: f64,
    pub correct_count: u32,
    pub total_questions: u32,
    pub time_taken_seconds: u64,
    pub category_scores: BTreeMap<String, CategoryScore>,
}

impl From<SubmitAttemptResponse> for GradedResult {
    fn from(resp: SubmitAttemptResponse) -> Self {
        let category_scores = category_scores(&resp.per_question);
        Self {
            total_score: resp.total_score,
            correct_count: resp.correct_count,
            total_questions: resp.total_questions,
            time_taken_seconds: resp.time_taken_seconds,
            category_scores,
        }
    }
}

/// Groups the per-question breakdown by category.
///
/// A question counts as correct when its auto score is strictly positive,
/// so partially credited answers are correct too.
pub fn category_scores(outcomes: &[QuestionOutcome]) -> BTreeMap<String, CategoryScore> {
    let mut scores: BTreeMap<String, CategoryScore> = BTreeMap::new();

    for outcome in outcomes {
        let entry = scores.entry(outcome.category.clone()).or_default();
        entry.total += 1;
        if outcome.auto_score > 0.0 {
            entry.correct += 1;
        }
    }

    scores
}
