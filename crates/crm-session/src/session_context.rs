//! Shared session state published by the identity layer and observed by
//! everything that needs to know whether a remote call is possible.

use std::fmt;

use tokio::sync::watch;

use crm_client::ActorHandle;
use crm_core::SessionIdentity;

/// Point-in-time view of the session.
#[derive(Clone, Default)]
pub struct SessionSnapshot {
    /// Resolved principal, absent until the identity layer reports one
    pub identity: Option<SessionIdentity>,
    /// Live mutation channel, absent while (re)connecting
    pub actor: Option<ActorHandle>,
    /// True while an identity refresh is in progress
    pub fetching: bool,
}

impl SessionSnapshot {
    /// Whether an authenticated remote call is possible right now.
    ///
    /// All four factors must hold at once: a live channel handle, no
    /// refresh in progress, and a resolved, non-anonymous identity.
    pub fn is_ready(&self) -> bool {
        self.actor.is_some()
            && !self.fetching
            && self.identity.is_some_and(|identity| !identity.anonymous)
    }

    /// The channel handle, but only when the full readiness predicate holds
    pub fn ready_actor(&self) -> Option<ActorHandle> {
        if self.is_ready() {
            self.actor.clone()
        } else {
            None
        }
    }
}

impl fmt::Debug for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSnapshot")
            .field("identity", &self.identity)
            .field("actor", &self.actor.is_some())
            .field("fetching", &self.fetching)
            .finish()
    }
}

/// Publisher half of the session state.
///
/// The identity layer owns one of these and pushes changes through it;
/// consumers subscribe and always read the latest snapshot, so a login
/// that finishes propagating between two checks is never missed.
pub struct SessionContext {
    tx: watch::Sender<SessionSnapshot>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::default());
        Self { tx }
    }

    /// Subscribe to session changes
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    /// Readiness view over this context
    pub fn monitor(&self) -> crate::ReadinessMonitor {
        crate::ReadinessMonitor::new(self.subscribe())
    }

    /// Current snapshot (fresh read)
    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    pub fn set_identity(&self, identity: Option<SessionIdentity>) {
        self.tx.send_modify(|snapshot| snapshot.identity = identity);
    }

    pub fn set_actor(&self, actor: Option<ActorHandle>) {
        self.tx.send_modify(|snapshot| snapshot.actor = actor);
    }

    pub fn set_fetching(&self, fetching: bool) {
        self.tx.send_modify(|snapshot| snapshot.fetching = fetching);
    }

    /// Replace the whole snapshot in one update
    pub fn replace(&self, snapshot: SessionSnapshot) {
        self.tx.send_replace(snapshot);
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
