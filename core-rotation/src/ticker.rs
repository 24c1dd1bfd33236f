//! Rotation timer lifecycle.
//!
//! Exactly one timer task may exist at a time: a dangling timer would drive an
//! extra uncoordinated `tick`, so starting a new one always cancels the old
//! one first. The owner restarts or stops the ticker whenever the interval,
//! the pause state, or the collection size changes.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Handle to the (at most one) background rotation timer.
pub struct RotationTicker {
    cancel: Option<CancellationToken>,
    handle: Option<JoinHandle<()>>,
}

impl RotationTicker {
    /// Create a ticker with no timer running.
    pub fn new() -> Self {
        Self {
            cancel: None,
            handle: None,
        }
    }

    /// Returns `true` while a timer task is active.
    pub fn is_running(&self) -> bool {
        self.cancel.is_some()
    }

    /// Start a timer firing `on_tick` every `interval`, cancelling any
    /// previously running timer first.
    pub fn restart<F>(&mut self, interval: Duration, mut on_tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.stop();

        let token = CancellationToken::new();
        let task_token = token.clone();

        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick completes immediately; swallow it so the
            // first advance happens one full period after start.
            timer.tick().await;

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = timer.tick() => on_tick(),
                }
            }
        });

        debug!(interval_ms = interval.as_millis() as u64, "Rotation timer started");
        self.cancel = Some(token);
        self.handle = Some(handle);
    }

    /// Cancel the running timer, if any.
    pub fn stop(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
            debug!("Rotation timer stopped");
        }
        self.handle.take();
    }
}

impl Default for RotationTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RotationTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
