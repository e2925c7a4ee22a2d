//! Trait seams for the backend service.
//!
//! The session core talks to the backend exclusively through these
//! traits so that tests can script replies and so the identity layer
//! can swap transports without touching the coordinator.

use crate::{Result, VerifyOutcome};

use crm_core::{EmailAddress, ProfileDraft};

use std::sync::Arc;

use async_trait::async_trait;

/// OTP issuance and verification.
#[async_trait]
pub trait OtpService: Send + Sync {
    /// Request a fresh one-time code for `email`.
    /// Returns the issued code (delivery is simulated server-side).
    async fn generate_otp(&self, email: &EmailAddress) -> Result<String>;

    /// Check a submitted code against the active challenge.
    async fn verify_otp(&self, email: &EmailAddress, code: &str) -> Result<VerifyOutcome>;
}

/// The authenticated mutation channel.
///
/// A handle to this trait only exists while the identity layer considers
/// the channel usable; it may disappear and reappear across reconnects.
#[async_trait]
pub trait ProfileChannel: Send + Sync {
    /// Persist the profile draft for the logged-in user.
    async fn save_profile(&self, draft: &ProfileDraft) -> Result<()>;
}

/// Shared reference to the live mutation channel, as published by the
/// identity layer. Cloning is cheap; holding one does not keep the
/// channel authenticated.
pub type ActorHandle = Arc<dyn ProfileChannel>;
