// src/models/attempt.rs

use serde::{Deserialize, Serialize};

use crate::models::question::QuestionView;

/// Body returned by `POST /attempt/{quizId}/start`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAttemptResponse {
    /// Opaque id bound to this attempt only.
    pub attempt_id: String,
    pub questions: Vec<QuestionView>,
    pub duration_seconds: u32,
}

/// One answered question in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub question_id: String,
    pub selected_choice_id: String,
}

/// Body sent to `POST /attempt/{attemptId}/submit`.
///
/// Unanswered questions are omitted rather than sent as null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAttemptRequest {
    pub answers: Vec<AnswerEntry>,
}

/// Graded response of a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttemptResponse {
    pub total_score: f64,
    pub correct_count: u32,
    pub total_questions: u32,
    pub time_taken_seconds: u64,
    #[serde(default)]
    pub per_question: Vec<QuestionOutcome>,
}

/// Server-side grading of a single question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutcome {
    pub question_id: String,
    pub category: String,
    /// Partial score assigned by the auto-grader. Anything above zero
    /// counts as correct.
    pub auto_score: f64,
}
