// src/models/question.rs

use serde::{Deserialize, Serialize};

/// A question as served at attempt start.
///
/// This is a snapshot: later edits to the master question by faculty do
/// not affect an attempt that is already running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub question_id: String,

    /// The text content of the question.
    pub text: String,

    /// Options in display order.
    pub choices: Vec<Choice>,

    /// Topic tag used for per-category feedback (e.g. "DBMS").
    pub category: String,

    #[serde(default)]
    pub points: u32,

    #[serde(default)]
    pub difficulty: Difficulty,
}

impl QuestionView {
    pub fn has_choice(&self, choice_id: &str) -> bool {
        self.choices.iter().any(|c| c.choice_id == choice_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub choice_id: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "EASY", alias = "Easy")]
    Easy,
    #[default]
    #[serde(alias = "MEDIUM", alias = "Medium")]
    Medium,
    #[serde(alias = "HARD", alias = "Hard")]
    Hard,
}
