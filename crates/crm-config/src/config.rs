use crate::{
    BackendConfig, ConfigError, ConfigErrorResult, LoggingConfig, OtpConfig, ReadinessConfig,
    SaveConfig,
};

use std::path::PathBuf;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub otp: OtpConfig,
    pub readiness: ReadinessConfig,
    pub save: SaveConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for CRM_CONFIG_DIR env var, else use ./.crm/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply CRM_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        // Auto-create config directory
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: CRM_CONFIG_DIR env var > ./.crm/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("CRM_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".crm"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.backend.validate()?;
        self.otp.validate()?;
        self.readiness.validate()?;
        self.save.validate()?;

        Ok(())
    }

    /// Log configuration summary (NEVER logs secrets or codes).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  backend: {} (timeout {}s, user header: {})",
            self.backend.base_url,
            self.backend.request_timeout_secs,
            if self.backend.user_id.is_some() {
                "set"
            } else {
                "unset"
            }
        );
        info!(
            "  otp: ttl={}s, code_length={}",
            self.otp.ttl_secs, self.otp.code_length
        );
        info!("  readiness: wait={}ms", self.readiness.wait_timeout_ms);
        info!(
            "  save: attempts={}, delay={}ms, settle={}ms",
            self.save.max_attempts, self.save.retry_delay_ms, self.save.settle_delay_ms
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Backend
        Self::apply_env_string("CRM_BACKEND_BASE_URL", &mut self.backend.base_url);
        Self::apply_env_parse(
            "CRM_BACKEND_REQUEST_TIMEOUT_SECS",
            &mut self.backend.request_timeout_secs,
        );
        Self::apply_env_option_string("CRM_BACKEND_USER_ID", &mut self.backend.user_id);

        // OTP
        Self::apply_env_parse("CRM_OTP_TTL_SECS", &mut self.otp.ttl_secs);
        Self::apply_env_parse("CRM_OTP_CODE_LENGTH", &mut self.otp.code_length);

        // Readiness
        Self::apply_env_parse(
            "CRM_READINESS_WAIT_TIMEOUT_MS",
            &mut self.readiness.wait_timeout_ms,
        );

        // Save
        Self::apply_env_parse("CRM_SAVE_MAX_ATTEMPTS", &mut self.save.max_attempts);
        Self::apply_env_parse("CRM_SAVE_RETRY_DELAY_MS", &mut self.save.retry_delay_ms);
        Self::apply_env_parse("CRM_SAVE_SETTLE_DELAY_MS", &mut self.save.settle_delay_ms);

        // Logging
        Self::apply_env_parse("CRM_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("CRM_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("CRM_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
