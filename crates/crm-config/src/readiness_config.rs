use crate::{ConfigError, ConfigErrorResult};

use std::time::Duration;

use serde::Deserialize;

// Readiness constraints
pub const MIN_WAIT_TIMEOUT_MS: u64 = 100;
pub const MAX_WAIT_TIMEOUT_MS: u64 = 60000;
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 8000;

/// How long a queued save waits for the session to become ready.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Total budget in milliseconds before a queued save fails
    pub wait_timeout_ms: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        }
    }
}

impl ReadinessConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.wait_timeout_ms < MIN_WAIT_TIMEOUT_MS
            || self.wait_timeout_ms > MAX_WAIT_TIMEOUT_MS
        {
            return Err(ConfigError::readiness(format!(
                "readiness.wait_timeout_ms must be {}-{}, got {}",
                MIN_WAIT_TIMEOUT_MS, MAX_WAIT_TIMEOUT_MS, self.wait_timeout_ms
            )));
        }

        Ok(())
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }
}
