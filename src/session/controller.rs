// src/session/controller.rs

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::{
    api::QuizBackend,
    error::{AttemptError, START_FALLBACK_MESSAGE, SUBMIT_FALLBACK_MESSAGE},
    models::{attempt::SubmitAttemptRequest, result::GradedResult, user::CurrentUser},
    session::{AttemptSession, AttemptStatus},
};

enum Slot {
    Idle,
    Loading { quiz_id: String },
    Active(Active),
}

struct Active {
    session: AttemptSession,
    /// Set while a submit request is awaiting the backend.
    submit_in_flight: bool,
}

struct PendingSubmit {
    generation: u64,
    attempt_id: String,
    request: SubmitAttemptRequest,
}

enum SubmitStep {
    /// Nothing to send: already in flight or already graded.
    Settled(Option<GradedResult>),
    Dispatch(PendingSubmit),
}

struct Inner {
    slot: Slot,
    /// Bumped by every `start` and `reset`, so a response that arrives for
    /// an attempt the user already left is dropped.
    generation: u64,
}

/// Drives one quiz attempt at a time: `start`, `select_answer`, `tick`,
/// `submit`, `reset`.
///
/// State lives behind a mutex that is never held across a backend call, so
/// a countdown task and UI events can share the controller through an
/// `Arc` without blocking each other.
pub struct AttemptController {
    backend: Arc<dyn QuizBackend>,
    user: CurrentUser,
    inner: Mutex<Inner>,
}

impl AttemptController {
    pub fn new(backend: Arc<dyn QuizBackend>, user: CurrentUser) -> Self {
        Self {
            backend,
            user,
            inner: Mutex::new(Inner {
                slot: Slot::Idle,
                generation: 0,
            }),
        }
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    pub async fn status(&self) -> AttemptStatus {
        match &self.inner.lock().await.slot {
            Slot::Idle => AttemptStatus::Idle,
            Slot::Loading { .. } => AttemptStatus::Loading,
            Slot::Active(active) => active.session.status,
        }
    }

    /// A copy of the current attempt, if one has been started.
    pub async fn snapshot(&self) -> Option<AttemptSession> {
        match &self.inner.lock().await.slot {
            Slot::Active(active) => Some(active.session.clone()),
            _ => None,
        }
    }

    pub async fn remaining_seconds(&self) -> Option<u32> {
        match &self.inner.lock().await.slot {
            Slot::Active(active) => Some(active.session.remaining_seconds),
            _ => None,
        }
    }

    pub async fn result(&self) -> Option<GradedResult> {
        match &self.inner.lock().await.slot {
            Slot::Active(active) => active.session.result.clone(),
            _ => None,
        }
    }

    /// Starts a new timed attempt for `quiz_id`.
    ///
    /// On failure the controller goes back to `Idle` with nothing retained.
    pub async fn start(&self, quiz_id: &str) -> Result<AttemptSession, AttemptError> {
        let quiz_id = quiz_id.trim();
        if quiz_id.is_empty() {
            return Err(AttemptError::Start("Quiz id must not be empty".to_string()));
        }

        if !self.user.role.can_take_quizzes() {
            tracing::warn!(
                "User {} ({:?}) tried to start quiz {}",
                self.user.id,
                self.user.role,
                quiz_id
            );
            return Err(AttemptError::Start(
                "Only students can take quizzes".to_string(),
            ));
        }

        let generation = {
            let mut inner = self.inner.lock().await;
            if !matches!(inner.slot, Slot::Idle) {
                return Err(AttemptError::Start(
                    "An attempt is already active; reset it before starting another".to_string(),
                ));
            }
            inner.generation += 1;
            inner.slot = Slot::Loading {
                quiz_id: quiz_id.to_string(),
            };
            inner.generation
        };

        tracing::info!("User {} starting quiz {}", self.user.id, quiz_id);
        let outcome = self.backend.start_attempt(quiz_id).await;

        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            tracing::info!("Quiz {} was left while loading, dropping response", quiz_id);
            return Err(AttemptError::Start("Attempt was cancelled".to_string()));
        }

        match outcome {
            Ok(started) => {
                let session = AttemptSession::from_started(quiz_id, started);
                tracing::info!(
                    "Attempt {} in progress: {} questions, {}s",
                    session.attempt_id,
                    session.questions.len(),
                    session.duration_seconds
                );
                inner.slot = Slot::Active(Active {
                    session: session.clone(),
                    submit_in_flight: false,
                });
                Ok(session)
            }
            Err(e) => {
                tracing::error!("Failed to start quiz {}: {:?}", quiz_id, e);
                inner.slot = Slot::Idle;
                Err(AttemptError::Start(e.user_message(START_FALLBACK_MESSAGE)))
            }
        }
    }

    /// Records `choice_id` for `question_id`, replacing any earlier choice.
    ///
    /// Returns `false` and changes nothing when the attempt is not in
    /// progress or the ids are not part of the question snapshot.
    pub async fn select_answer(&self, question_id: &str, choice_id: &str) -> bool {
        let mut inner = self.inner.lock().await;
        let Slot::Active(active) = &mut inner.slot else {
            tracing::debug!("Ignoring answer for {}: no active attempt", question_id);
            return false;
        };

        let session = &mut active.session;
        if session.status != AttemptStatus::InProgress {
            tracing::debug!(
                "Ignoring answer for {}: attempt is {:?}",
                question_id,
                session.status
            );
            return false;
        }

        match session.question(question_id) {
            Some(question) if question.has_choice(choice_id) => {}
            Some(_) => {
                tracing::debug!("Ignoring unknown choice {} for {}", choice_id, question_id);
                return false;
            }
            None => {
                tracing::debug!("Ignoring answer for unknown question {}", question_id);
                return false;
            }
        }

        session
            .answers
            .insert(question_id.to_string(), choice_id.to_string());
        true
    }

    /// Advances the countdown by one second.
    ///
    /// When time runs out the attempt is submitted and the outcome of that
    /// submission is returned. Outside `InProgress` this does nothing.
    pub async fn tick(&self) -> Result<Option<GradedResult>, AttemptError> {
        // Reaching zero and entering `Submitting` happen under one lock, so
        // nothing queued behind the tick sees an expired attempt in progress.
        let dispatch = {
            let mut inner = self.inner.lock().await;
            let Slot::Active(active) = &mut inner.slot else {
                return Ok(None);
            };
            let session = &mut active.session;
            if session.status != AttemptStatus::InProgress {
                return Ok(None);
            }
            session.remaining_seconds = session.remaining_seconds.saturating_sub(1);
            if session.remaining_seconds > 0 {
                return Ok(None);
            }

            tracing::info!("Time is up, submitting automatically");
            match Self::prepare_submit(&mut inner)? {
                SubmitStep::Settled(outcome) => return Ok(outcome),
                SubmitStep::Dispatch(dispatch) => dispatch,
            }
        };

        self.dispatch_submit(dispatch).await
    }

    /// Hands the recorded answers in for grading.
    ///
    /// At most one submission is in flight: a call made meanwhile returns
    /// `Ok(None)`, and once completed the stored result is returned without
    /// contacting the backend again. A failed submission leaves the attempt
    /// in `Submitting` with its answers frozen; calling `submit` again retries.
    pub async fn submit(&self) -> Result<Option<GradedResult>, AttemptError> {
        let dispatch = {
            let mut inner = self.inner.lock().await;
            match Self::prepare_submit(&mut inner)? {
                SubmitStep::Settled(outcome) => return Ok(outcome),
                SubmitStep::Dispatch(dispatch) => dispatch,
            }
        };

        self.dispatch_submit(dispatch).await
    }

    /// Moves the attempt to `Submitting` and freezes the request body.
    /// Must run under the same guard as the check that triggered it.
    fn prepare_submit(inner: &mut Inner) -> Result<SubmitStep, AttemptError> {
        let generation = inner.generation;
        let Slot::Active(active) = &mut inner.slot else {
            return Err(AttemptError::NotStarted);
        };

        match active.session.status {
            AttemptStatus::Completed => {
                return Ok(SubmitStep::Settled(active.session.result.clone()));
            }
            AttemptStatus::Submitting if active.submit_in_flight => {
                tracing::debug!(
                    "Submit of {} already in flight, ignoring",
                    active.session.attempt_id
                );
                return Ok(SubmitStep::Settled(None));
            }
            _ => {}
        }

        active.session.status = AttemptStatus::Submitting;
        active.submit_in_flight = true;
        Ok(SubmitStep::Dispatch(PendingSubmit {
            generation,
            attempt_id: active.session.attempt_id.clone(),
            request: active.session.submission(),
        }))
    }

    async fn dispatch_submit(
        &self,
        pending: PendingSubmit,
    ) -> Result<Option<GradedResult>, AttemptError> {
        let PendingSubmit {
            generation,
            attempt_id,
            request,
        } = pending;

        tracing::info!(
            "Submitting attempt {} with {} answers",
            attempt_id,
            request.answers.len()
        );
        let outcome = self.backend.submit_attempt(&attempt_id, &request).await;

        let mut inner = self.inner.lock().await;
        let current = inner.generation;
        let active = match &mut inner.slot {
            Slot::Active(active) if current == generation => active,
            _ => {
                tracing::info!("Attempt {} was reset while submitting", attempt_id);
                return Err(AttemptError::Submit(
                    "Attempt was reset while submitting".to_string(),
                ));
            }
        };
        active.submit_in_flight = false;

        match outcome {
            Ok(response) => {
                let result = GradedResult::from(response);
                tracing::info!(
                    "Attempt {} graded: {}/{} correct, score {}",
                    attempt_id,
                    result.correct_count,
                    result.total_questions,
                    result.total_score
                );
                active.session.status = AttemptStatus::Completed;
                active.session.submitted_at = Some(Utc::now());
                active.session.result = Some(result.clone());
                Ok(Some(result))
            }
            Err(e) => {
                tracing::error!("Failed to submit attempt {}: {:?}", attempt_id, e);
                Err(AttemptError::Submit(e.user_message(SUBMIT_FALLBACK_MESSAGE)))
            }
        }
    }

    /// Discards the current attempt so `start` can be called again.
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        match &inner.slot {
            Slot::Active(active) => {
                tracing::info!("Discarding attempt {}", active.session.attempt_id)
            }
            Slot::Loading { quiz_id } => tracing::info!("Abandoning start of quiz {}", quiz_id),
            Slot::Idle => {}
        }
        inner.generation += 1;
        inner.slot = Slot::Idle;
    }
}
