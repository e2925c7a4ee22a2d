//! Readiness checks over the session context.

use std::time::Duration;

use log::warn;
use tokio::sync::watch;
use tokio::time::timeout;

use crate::session_context::SessionSnapshot;
use crm_client::ActorHandle;

/// Computes whether an authenticated remote call is possible.
///
/// Holds only a subscription; every check borrows the current snapshot,
/// so nothing here goes stale.
pub struct ReadinessMonitor {
    rx: watch::Receiver<SessionSnapshot>,
}

impl ReadinessMonitor {
    pub fn new(rx: watch::Receiver<SessionSnapshot>) -> Self {
        Self { rx }
    }

    /// Evaluate the readiness predicate against the current snapshot
    pub fn is_ready(&self) -> bool {
        self.rx.borrow().is_ready()
    }

    /// The live channel handle, if one is published
    pub fn current_handle(&self) -> Option<ActorHandle> {
        self.rx.borrow().actor.clone()
    }

    /// The handle, but only when the full readiness predicate holds
    pub fn ready_handle(&self) -> Option<ActorHandle> {
        self.rx.borrow().ready_actor()
    }

    /// Wait until the session is ready, up to `budget`.
    ///
    /// Driven by pushed session changes rather than polling. Returns the
    /// handle observed at the moment readiness held, or `None` once the
    /// budget elapses or the publishing side goes away.
    pub async fn wait_ready(&mut self, budget: Duration) -> Option<ActorHandle> {
        let wait = timeout(budget, async {
            loop {
                if let Some(handle) = self.rx.borrow().ready_actor() {
                    return Some(handle);
                }
                if self.rx.changed().await.is_err() {
                    warn!("session context closed while waiting for readiness");
                    return None;
                }
            }
        });

        match wait.await {
            Ok(result) => result,
            Err(_) => None,
        }
    }
}
