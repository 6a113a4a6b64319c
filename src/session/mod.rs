// src/session/mod.rs

pub mod controller;
pub mod countdown;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    models::{
        attempt::{AnswerEntry, StartAttemptResponse, SubmitAttemptRequest},
        question::QuestionView,
        result::GradedResult,
    },
    utils::time::format_clock,
};

pub use controller::AttemptController;

/// Lifecycle of the controller's attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttemptStatus {
    /// No attempt; `start` may be called.
    Idle,
    Loading,
    InProgress,
    Submitting,
    Completed,
}

/// Client-side state of a single quiz attempt.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptSession {
    pub attempt_id: String,
    pub quiz_id: String,
    pub questions: Vec<QuestionView>,
    /// question id -> selected choice id
    pub answers: HashMap<String, String>,
    pub duration_seconds: u32,
    pub remaining_seconds: u32,
    pub status: AttemptStatus,
    pub result: Option<GradedResult>,
    pub started_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl AttemptSession {
    pub(crate) fn from_started(quiz_id: &str, started: StartAttemptResponse) -> Self {
        Self {
            attempt_id: started.attempt_id,
            quiz_id: quiz_id.to_string(),
            questions: started.questions,
            answers: HashMap::new(),
            duration_seconds: started.duration_seconds,
            remaining_seconds: started.duration_seconds,
            status: AttemptStatus::InProgress,
            result: None,
            started_at: Utc::now(),
            submitted_at: None,
        }
    }

    pub fn question(&self, question_id: &str) -> Option<&QuestionView> {
        self.questions.iter().find(|q| q.question_id == question_id)
    }

    pub fn selected_choice(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Ids of questions without a recorded answer, in question order.
    pub fn unanswered(&self) -> Vec<&str> {
        self.questions
            .iter()
            .filter(|q| !self.answers.contains_key(&q.question_id))
            .map(|q| q.question_id.as_str())
            .collect()
    }

    /// Remaining time for the timer display.
    pub fn remaining_clock(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    /// The submission body: answered questions only, in question order.
    pub fn submission(&self) -> SubmitAttemptRequest {
        let answers = self
            .questions
            .iter()
            .filter_map(|q| {
                self.answers.get(&q.question_id).map(|choice| AnswerEntry {
                    question_id: q.question_id.clone(),
                    selected_choice_id: choice.clone(),
                })
            })
            .collect();

        SubmitAttemptRequest { answers }
    }
}
