use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// Save retry constraints
pub const MIN_MAX_ATTEMPTS: u32 = 1;
pub const MAX_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

pub const MIN_RETRY_DELAY_MS: u64 = 100;
pub const MAX_RETRY_DELAY_MS: u64 = 10000;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

pub const MAX_SETTLE_DELAY_MS: u64 = 5000;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 200;

/// Retry behavior for profile saves.
///
/// Spacing is fixed-interval: identity propagation settles on its own
/// schedule, and backing off further only delays the save.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Maximum attempts per save sequence (including the first)
    pub max_attempts: u32,
    /// Delay between attempts in milliseconds
    pub retry_delay_ms: u64,
    /// Delay between an auto-fired dispatch and its first attempt
    pub settle_delay_ms: u64,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl SaveConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_attempts < MIN_MAX_ATTEMPTS || self.max_attempts > MAX_MAX_ATTEMPTS {
            return Err(ConfigError::save(format!(
                "save.max_attempts must be {}-{}, got {}",
                MIN_MAX_ATTEMPTS, MAX_MAX_ATTEMPTS, self.max_attempts
            )));
        }

        if self.retry_delay_ms < MIN_RETRY_DELAY_MS || self.retry_delay_ms > MAX_RETRY_DELAY_MS {
            return Err(ConfigError::save(format!(
                "save.retry_delay_ms must be {}-{}, got {}",
                MIN_RETRY_DELAY_MS, MAX_RETRY_DELAY_MS, self.retry_delay_ms
            )));
        }

        if self.settle_delay_ms > MAX_SETTLE_DELAY_MS {
            return Err(ConfigError::save(format!(
                "save.settle_delay_ms must be at most {}, got {}",
                MAX_SETTLE_DELAY_MS, self.settle_delay_ms
            )));
        }

        Ok(())
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
