use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {source} {location}")]
    Config {
        #[source]
        source: crm_config::ConfigError,
        location: ErrorLocation,
    },

    #[error("Backend error: {source} {location}")]
    Client {
        #[source]
        source: crm_client::ClientError,
        location: ErrorLocation,
    },

    #[error("Login error: {source} {location}")]
    Otp {
        #[source]
        source: crm_session::OtpError,
        location: ErrorLocation,
    },

    #[error("Save error: {source} {location}")]
    Save {
        #[source]
        source: crm_session::SaveError,
        location: ErrorLocation,
    },

    #[error("Input error: {message} {location}")]
    Input {
        message: String,
        location: ErrorLocation,
    },

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("{message}")]
    Aborted { message: String },
}

impl CliError {
    #[track_caller]
    pub fn input<S: Into<String>>(message: S) -> Self {
        Self::Input {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logger<S: Into<String>>(message: S) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn aborted<S: Into<String>>(message: S) -> Self {
        Self::Aborted {
            message: message.into(),
        }
    }

    /// Suggested recovery action, where one exists
    pub fn recovery_hint(&self) -> Option<&'static str> {
        match self {
            Self::Client { source, .. } => Some(source.recovery_hint()),
            Self::Otp { source, .. } => Some(source.recovery_hint()),
            Self::Save { source, .. } => Some(source.recovery_hint()),
            Self::Config { .. } | Self::Input { .. } | Self::Logger { .. } | Self::Aborted { .. } => {
                None
            }
        }
    }
}

impl From<crm_config::ConfigError> for CliError {
    #[track_caller]
    fn from(err: crm_config::ConfigError) -> Self {
        Self::Config {
            source: err,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<crm_client::ClientError> for CliError {
    #[track_caller]
    fn from(err: crm_client::ClientError) -> Self {
        Self::Client {
            source: err,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<crm_session::OtpError> for CliError {
    #[track_caller]
    fn from(err: crm_session::OtpError) -> Self {
        Self::Otp {
            source: err,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<crm_session::SaveError> for CliError {
    #[track_caller]
    fn from(err: crm_session::SaveError) -> Self {
        Self::Save {
            source: err,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for CliError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::Input {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type CliResult<T> = std::result::Result<T, CliError>;
