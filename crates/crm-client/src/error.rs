use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors that can occur talking to the CRM backend
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP status {status}: {message} {location}")]
    Status {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity not ready: {message} {location}")]
    IdentityNotReady {
        message: String,
        location: ErrorLocation,
    },

    #[error("Rejected by backend: {message} {location}")]
    Rejected {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Whether a save attempt hitting this error may be retried.
    ///
    /// Transport-level failures and identity-propagation rejections are
    /// expected to clear on their own; structured rejections are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Status { .. } | Self::IdentityNotReady { .. }
        )
    }

    /// The bare failure text, without the variant framing.
    ///
    /// For backend rejections this is the backend's own wording.
    pub fn message(&self) -> &str {
        match self {
            Self::Http { message, .. }
            | Self::Status { message, .. }
            | Self::IdentityNotReady { message, .. }
            | Self::Rejected { message, .. }
            | Self::Json { message, .. } => message,
        }
    }

    /// User-friendly recovery hint.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::Http { .. } => {
                "Could not reach the CRM backend. \
                   Check your network connection and try again."
            }
            Self::Status { .. } => {
                "The backend returned an unexpected response. \
                   Try again in a moment."
            }
            Self::IdentityNotReady { .. } => {
                "Your login is still propagating. \
                   The request will be retried automatically."
            }
            Self::Rejected { .. } => {
                "The backend rejected the request. \
                   Review the submitted values before retrying."
            }
            Self::Json { .. } => {
                "The backend sent a malformed response. \
                   Please report this issue."
            }
        }
    }

    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        ClientError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        ClientError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Create a status error for an unstructured non-success reply
    #[track_caller]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        ClientError::Status {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create an identity-propagation rejection
    #[track_caller]
    pub fn identity_not_ready(message: impl Into<String>) -> Self {
        ClientError::IdentityNotReady {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create a fatal rejection
    #[track_caller]
    pub fn rejected(message: impl Into<String>) -> Self {
        ClientError::Rejected {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        ClientError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for ClientError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        ClientError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
