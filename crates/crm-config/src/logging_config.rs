use crate::{DEFAULT_LOG_LEVEL, LogLevel};

use serde::Deserialize;

pub const DEFAULT_LOG_COLORED: bool = true;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Colored output for TTY (ignored when logging to a file)
    pub colored: bool,
    /// Optional log file path. None = console
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel(DEFAULT_LOG_LEVEL),
            colored: DEFAULT_LOG_COLORED,
            file: None,
        }
    }
}
