//! Background timer tick.
//!
//! One spawned loop per timed phase writes the derived elapsed seconds into
//! the session, and only when the value changed. The loop is cancelled when
//! the session resets or the timed phase ends, so no tick outlives a
//! discarded session. It parks itself once the countdown reaches zero; the
//! step flow stays a user action.

use chrono::Utc;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use tenmark_core::SessionState;
use tenmark_core::timer;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Handle for the recurring timer tick task.
pub struct TimerTicker {
    token: Mutex<Option<CancellationToken>>,
}

impl TimerTicker {
    pub fn new() -> Self {
        Self {
            token: Mutex::new(None),
        }
    }

    /// Starts the tick loop for a session. A previous loop, if any, is
    /// cancelled first so two tickers never race on one record.
    pub fn start(&self, state: Arc<RwLock<SessionState>>) {
        let token = CancellationToken::new();
        if let Some(previous) = self
            .token
            .lock()
            .expect("ticker token lock poisoned")
            .replace(token.clone())
        {
            previous.cancel();
        }

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            tracing::debug!(target: "timer", "Tick loop started");

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!(target: "timer", "Tick loop cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        let mut session = state.write().await;
                        let Some(start) = session.timer_start else {
                            continue;
                        };
                        let now = Utc::now();
                        session.record_elapsed(timer::elapsed_seconds(start, now));
                        if timer::remaining_seconds(start, now) == 0 {
                            tracing::debug!(target: "timer", "Countdown reached zero");
                            break;
                        }
                    }
                }
            }
        });
    }

    /// Cancels the running tick loop, if any.
    pub fn stop(&self) {
        if let Some(token) = self
            .token
            .lock()
            .expect("ticker token lock poisoned")
            .take()
        {
            token.cancel();
        }
    }
}

impl Default for TimerTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TimerTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
