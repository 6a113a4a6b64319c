// src/error.rs

use thiserror::Error;

/// Message used when the backend gives no reason for a failed start.
pub const START_FALLBACK_MESSAGE: &str = "Failed to start quiz attempt";

/// Message used when the backend gives no reason for a failed submit.
pub const SUBMIT_FALLBACK_MESSAGE: &str = "Failed to submit quiz attempt";

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Errors raised by a `QuizBackend` implementation.
#[derive(Debug, Error)]
pub enum ApiError {
    // Connection refused, timeout, malformed JSON body...
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    // Non-2xx response, with the `error` field of the body when there is one
    #[error("backend responded with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Human-readable reason suitable for showing to a student.
    ///
    /// Falls back to `fallback` when the backend did not explain itself.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            ApiError::Transport(e) if e.is_timeout() => {
                format!("{fallback}: the server took too long to respond")
            }
            ApiError::Transport(e) if e.is_connect() => {
                format!("{fallback}: could not reach the server")
            }
            _ => fallback.to_string(),
        }
    }
}

/// Errors raised while decoding the portal's session token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Errors surfaced by the attempt session controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    /// The attempt never reached `InProgress`. Callers should offer a retry.
    #[error("{0}")]
    Start(String),

    /// The submission was not accepted. The session stays in `Submitting`
    /// and `submit()` may be called again.
    #[error("{0}")]
    Submit(String),

    #[error("no quiz attempt has been started")]
    NotStarted,
}
