use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// OTP constraints
pub const MIN_TTL_SECS: u32 = 60;
pub const MAX_TTL_SECS: u32 = 3600;
pub const DEFAULT_TTL_SECS: u32 = 600;

pub const MIN_CODE_LENGTH: usize = 4;
pub const MAX_CODE_LENGTH: usize = 10;
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// OTP challenge settings.
///
/// The TTL drives the login countdown; the backend enforces the real
/// expiry, so these values must match what it issues.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Challenge lifetime in seconds
    pub ttl_secs: u32,
    /// Exact length a submitted code must have
    pub code_length: usize,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_TTL_SECS,
            code_length: DEFAULT_CODE_LENGTH,
        }
    }
}

impl OtpConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.ttl_secs < MIN_TTL_SECS || self.ttl_secs > MAX_TTL_SECS {
            return Err(ConfigError::otp(format!(
                "otp.ttl_secs must be {}-{}, got {}",
                MIN_TTL_SECS, MAX_TTL_SECS, self.ttl_secs
            )));
        }

        if self.code_length < MIN_CODE_LENGTH || self.code_length > MAX_CODE_LENGTH {
            return Err(ConfigError::otp(format!(
                "otp.code_length must be {}-{}, got {}",
                MIN_CODE_LENGTH, MAX_CODE_LENGTH, self.code_length
            )));
        }

        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.ttl_secs))
    }
}
