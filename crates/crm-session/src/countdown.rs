//! Login challenge countdown.

use std::time::Duration;

use log::debug;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::error::{OtpError, OtpResult};

/// Live countdown value observed by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownState {
    pub remaining_secs: u32,
    pub is_expired: bool,
}

impl CountdownState {
    fn fresh(ttl_secs: u32) -> Self {
        Self {
            remaining_secs: ttl_secs,
            is_expired: false,
        }
    }
}

/// One-at-a-time countdown driven by a background tick task.
///
/// `start` refuses to run while a previous countdown is still ticking,
/// so an overlapping timer is a detectable caller bug rather than a
/// silent double decrement. Only `stop` cancels the tick task; dropping
/// receivers does not.
pub struct CountdownTimer {
    active: Option<ActiveCountdown>,
}

struct ActiveCountdown {
    task: JoinHandle<()>,
    rx: watch::Receiver<CountdownState>,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Start a fresh countdown from `ttl`.
    ///
    /// Errors if a previous countdown is still ticking; call `stop`
    /// first. A countdown that already reached zero does not block a
    /// new start.
    pub fn start(&mut self, ttl: Duration) -> OtpResult<watch::Receiver<CountdownState>> {
        if let Some(active) = &self.active {
            if active.task.is_finished() {
                self.active = None;
            } else {
                return Err(OtpError::countdown_still_running());
            }
        }

        let ttl_secs = ttl.as_secs() as u32;
        let (tx, rx) = watch::channel(CountdownState::fresh(ttl_secs));

        let task = tokio::spawn(async move {
            let mut remaining = ttl_secs;

            while remaining > 0 {
                sleep(Duration::from_secs(1)).await;
                remaining -= 1;

                let state = CountdownState {
                    remaining_secs: remaining,
                    is_expired: remaining == 0,
                };
                if tx.send(state).is_err() {
                    // Every receiver is gone; no further tick can be observed.
                    return;
                }
            }

            debug!("countdown expired");
        });

        self.active = Some(ActiveCountdown {
            task,
            rx: rx.clone(),
        });

        Ok(rx)
    }

    /// Cancel the running countdown, if any
    pub fn stop(&mut self) {
        if let Some(active) = self.active.take() {
            active.task.abort();
        }
    }

    /// Receiver for the current countdown, if one was started
    pub fn subscribe(&self) -> Option<watch::Receiver<CountdownState>> {
        self.active.as_ref().map(|active| active.rx.clone())
    }

    /// Whether a countdown is currently ticking
    pub fn is_running(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| !active.task.is_finished())
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}
