//! Session identity as published by the identity provider.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The principal behind the current session.
///
/// Owned by the external identity layer; everything else only observes
/// it. An anonymous identity exists before login completes and while the
/// backend is still propagating a fresh login across its services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub subject: Uuid,
    pub anonymous: bool,
}

impl SessionIdentity {
    /// Identity for a completed, propagated login
    pub fn authenticated(subject: Uuid) -> Self {
        Self {
            subject,
            anonymous: false,
        }
    }

    /// Placeholder identity before or during login
    pub fn anonymous() -> Self {
        Self {
            subject: Uuid::new_v4(),
            anonymous: true,
        }
    }
}
