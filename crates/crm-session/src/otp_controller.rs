//! OTP login flow state machine.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde_json::Value;
use tokio::sync::watch;

use crate::countdown::{CountdownState, CountdownTimer};
use crate::error::{OtpError, OtpResult};
use crm_client::{OtpService, VerifyOutcome};
use crm_config::OtpConfig;
use crm_core::EmailAddress;

/// Where the login flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPhase {
    /// No challenge requested yet, or the flow was abandoned
    Idle,
    /// Code issued; waiting for the user to type it
    AwaitingCode,
    /// Challenge verified; login complete
    Verified,
    /// Challenge ran out; a resend is required
    Expired,
}

struct ActiveChallenge {
    email: EmailAddress,
    code: String,
    issued_at: DateTime<Utc>,
}

/// Drives the request-code / verify-code login flow.
///
/// Owns the active challenge and its countdown. At most one challenge
/// is live at a time; `generate` replaces the previous one atomically,
/// stopping its countdown before starting the next.
pub struct OtpController {
    service: Arc<dyn OtpService>,
    config: OtpConfig,
    phase: OtpPhase,
    challenge: Option<ActiveChallenge>,
    countdown: CountdownTimer,
    verify_error: Option<String>,
}

impl OtpController {
    pub fn new(service: Arc<dyn OtpService>, config: OtpConfig) -> Self {
        Self {
            service,
            config,
            phase: OtpPhase::Idle,
            challenge: None,
            countdown: CountdownTimer::new(),
            verify_error: None,
        }
    }

    /// Request a fresh code and start its countdown.
    ///
    /// On success the previous challenge, countdown, and any recorded
    /// verification error are all replaced. A failed request leaves the
    /// current challenge untouched.
    pub async fn generate(&mut self, email: &str) -> OtpResult<()> {
        let email = EmailAddress::parse(email)?;

        debug!("requesting OTP code");
        let code = self.service.generate_otp(&email).await?;

        self.countdown.stop();
        self.countdown.start(self.config.ttl())?;
        self.challenge = Some(ActiveChallenge {
            email,
            code,
            issued_at: Utc::now(),
        });
        self.phase = OtpPhase::AwaitingCode;
        self.verify_error = None;

        info!(
            "OTP challenge issued; countdown started at {}s",
            self.config.ttl_secs
        );
        Ok(())
    }

    /// Request a replacement code, same semantics as `generate`
    pub async fn resend(&mut self, email: &str) -> OtpResult<()> {
        self.generate(email).await
    }

    /// Check a submitted code.
    ///
    /// Codes of the wrong length are rejected locally without a backend
    /// call. A mismatched code leaves the challenge usable so the user
    /// can correct a typo; an expired challenge is cleared and must be
    /// reissued.
    pub async fn verify(&mut self, email: &str, code: &str) -> OtpResult<Option<Value>> {
        if code.chars().count() != self.config.code_length {
            let err = OtpError::otp_invalid(format!(
                "code must be exactly {} characters",
                self.config.code_length
            ));
            self.verify_error = Some(err.to_string());
            return Err(err);
        }

        let email = EmailAddress::parse(email)?;

        match self.service.verify_otp(&email, code).await? {
            VerifyOutcome::Success { profile_status } => {
                self.countdown.stop();
                self.challenge = None;
                self.phase = OtpPhase::Verified;
                self.verify_error = None;
                info!("OTP verified; login complete");
                Ok(profile_status)
            }
            VerifyOutcome::Expired => {
                if let Some(challenge) = &self.challenge {
                    let age = (Utc::now() - challenge.issued_at).num_seconds();
                    warn!("OTP challenge reported expired after {age}s");
                }
                self.countdown.stop();
                self.challenge = None;
                self.phase = OtpPhase::Expired;
                let err = OtpError::otp_expired();
                self.verify_error = Some(err.to_string());
                Err(err)
            }
            VerifyOutcome::Invalid => {
                // Challenge stays usable; the user can correct the code.
                let err = OtpError::otp_invalid("code does not match");
                self.verify_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Walk away from the current challenge, back to email entry
    pub fn abandon(&mut self) {
        self.countdown.stop();
        self.challenge = None;
        self.phase = OtpPhase::Idle;
        self.verify_error = None;
    }

    /// Current phase, with countdown expiry folded in fresh
    pub fn phase(&self) -> OtpPhase {
        if self.phase == OtpPhase::AwaitingCode
            && let Some(rx) = self.countdown.subscribe()
            && rx.borrow().is_expired
        {
            return OtpPhase::Expired;
        }
        self.phase
    }

    /// Live countdown for the active challenge, if one is running
    pub fn countdown(&self) -> Option<watch::Receiver<CountdownState>> {
        self.countdown.subscribe()
    }

    /// Text of the last verification failure, cleared by `generate`
    pub fn verify_error(&self) -> Option<&str> {
        self.verify_error.as_deref()
    }

    /// Email of the active challenge
    pub fn challenge_email(&self) -> Option<&EmailAddress> {
        self.challenge.as_ref().map(|challenge| &challenge.email)
    }

    /// The issued code. Delivery is simulated, so the caller is expected
    /// to surface this to the user.
    pub fn issued_code(&self) -> Option<&str> {
        self.challenge
            .as_ref()
            .map(|challenge| challenge.code.as_str())
    }
}
