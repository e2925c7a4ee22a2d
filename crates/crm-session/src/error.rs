use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors surfaced by the OTP login flow.
#[derive(Error, Debug)]
pub enum OtpError {
    #[error("Invalid email address: {message} {location}")]
    EmailInvalid {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid code: {message} {location}")]
    OtpInvalid {
        message: String,
        location: ErrorLocation,
    },

    #[error("Code expired; request a new one {location}")]
    OtpExpired { location: ErrorLocation },

    #[error("Countdown already running {location}")]
    CountdownStillRunning { location: ErrorLocation },

    #[error("Backend error: {source} {location}")]
    Backend {
        #[source]
        source: crm_client::ClientError,
        location: ErrorLocation,
    },
}

impl OtpError {
    #[track_caller]
    pub fn email_invalid<S: Into<String>>(message: S) -> Self {
        Self::EmailInvalid {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn otp_invalid<S: Into<String>>(message: S) -> Self {
        Self::OtpInvalid {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn otp_expired() -> Self {
        Self::OtpExpired {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn countdown_still_running() -> Self {
        Self::CountdownStillRunning {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::EmailInvalid { .. } => "Correct the email address and try again",
            Self::OtpInvalid { .. } => "Re-enter the code from the email",
            Self::OtpExpired { .. } => "Request a new code",
            Self::CountdownStillRunning { .. } => {
                "Stop the running countdown before starting another"
            }
            Self::Backend { source, .. } => source.recovery_hint(),
        }
    }
}

impl From<crm_client::ClientError> for OtpError {
    #[track_caller]
    fn from(err: crm_client::ClientError) -> Self {
        Self::Backend {
            source: err,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<crm_core::CoreError> for OtpError {
    #[track_caller]
    fn from(err: crm_core::CoreError) -> Self {
        let crm_core::CoreError::Validation { message, .. } = err;
        Self::EmailInvalid {
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Terminal failures surfaced by a profile save.
///
/// Clone because a single terminal result may resolve several joined
/// submissions.
#[derive(Error, Debug, Clone)]
pub enum SaveError {
    #[error("Save channel not ready after {waited_ms}ms")]
    ActorNotReady { waited_ms: u64 },

    #[error("{message}")]
    Fatal {
        message: String,
        original_message: Option<String>,
    },
}

impl SaveError {
    pub fn actor_not_ready(waited_ms: u64) -> Self {
        Self::ActorNotReady { waited_ms }
    }

    pub fn fatal<S: Into<String>>(message: S, original_message: Option<String>) -> Self {
        Self::Fatal {
            message: message.into(),
            original_message,
        }
    }

    /// Stable discriminant for status payloads and logs
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::ActorNotReady { .. } => "actor_not_ready",
            Self::Fatal { .. } => "save_error",
        }
    }

    /// The raw text of the failure that exhausted the retry budget
    pub fn original_message(&self) -> Option<&str> {
        match self {
            Self::ActorNotReady { .. } => None,
            Self::Fatal {
                original_message, ..
            } => original_message.as_deref(),
        }
    }

    /// Suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::ActorNotReady { .. } => "Wait for the session to finish signing in, then retry",
            Self::Fatal { .. } => "Review the rejection and correct the profile before retrying",
        }
    }
}

pub type OtpResult<T> = std::result::Result<T, OtpError>;
pub type SaveResult<T> = std::result::Result<T, SaveError>;
