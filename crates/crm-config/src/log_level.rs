use crate::{DEFAULT_LOG_LEVEL, DEFAULT_LOG_LEVEL_STRING};

use std::ops::Deref;
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Deserializer};

/// Log level as written in `config.toml` or `CRM_LOG_LEVEL`.
///
/// Parsing is lossy on purpose: a typo in the level must not keep the
/// CLI from starting, so anything unrecognized becomes the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub LevelFilter);

impl LogLevel {
    fn parse_lossy(text: &str) -> Self {
        // LevelFilter's own FromStr is already case-insensitive.
        text.trim()
            .parse::<LevelFilter>()
            .map(LogLevel)
            .unwrap_or_default()
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel(DEFAULT_LOG_LEVEL)
    }
}

impl FromStr for LogLevel {
    type Err = std::convert::Infallible;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lossy(text))
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // A non-string value falls back rather than failing the whole
        // config load.
        let text = String::deserialize(deserializer)
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL_STRING.to_string());
        Ok(Self::parse_lossy(&text))
    }
}

impl Deref for LogLevel {
    type Target = LevelFilter;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
