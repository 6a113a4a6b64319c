// src/session/countdown.rs

use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::MissedTickBehavior};

use crate::session::{AttemptController, AttemptStatus};

/// Spawns the one-second countdown for the controller's current attempt.
///
/// The task ends once the attempt leaves `InProgress`: submitted by hand,
/// reset, or auto-submitted when time ran out. A failed auto-submit is
/// logged and left for the caller to retry through `submit()`.
pub fn spawn_countdown(controller: Arc<AttemptController>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;

            if controller.status().await != AttemptStatus::InProgress {
                break;
            }

            match controller.tick().await {
                Ok(Some(result)) => {
                    tracing::info!("Countdown finished, score {}", result.total_score);
                    break;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Automatic submit failed: {}", e);
                    break;
                }
            }
        }
    })
}
