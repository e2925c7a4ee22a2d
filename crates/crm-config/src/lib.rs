mod backend_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod otp_config;
mod readiness_config;
mod save_config;

pub use backend_config::BackendConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use otp_config::OtpConfig;
pub use readiness_config::ReadinessConfig;
pub use save_config::SaveConfig;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

#[cfg(test)]
mod tests;
