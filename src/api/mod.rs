// src/api/mod.rs

pub mod http;

use async_trait::async_trait;

use crate::{
    error::ApiError,
    models::attempt::{StartAttemptResponse, SubmitAttemptRequest, SubmitAttemptResponse},
};

/// The two backend operations an attempt depends on.
///
/// `HttpBackend` talks to the real REST API; tests plug in fakes.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Opens a new timed attempt and returns its question snapshot.
    async fn start_attempt(&self, quiz_id: &str) -> Result<StartAttemptResponse, ApiError>;

    /// Hands in the answers of an attempt and returns the graded result.
    async fn submit_attempt(
        &self,
        attempt_id: &str,
        request: &SubmitAttemptRequest,
    ) -> Result<SubmitAttemptResponse, ApiError>;
}
