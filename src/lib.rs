// src/lib.rs

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod session;
pub mod utils;

pub use api::{QuizBackend, http::HttpBackend};
pub use session::{AttemptController, AttemptSession, AttemptStatus, countdown::spawn_countdown};
