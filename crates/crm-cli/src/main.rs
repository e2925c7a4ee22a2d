//! crm - CRM client CLI
//!
//! OTP login and resilient profile saves against the CRM backend.
//!
//! # Examples
//!
//! ```bash
//! # Log in with a one-time passcode
//! crm login --email alex@example.com
//!
//! # Save the profile right after login; propagation is retried
//! crm profile save --name "Alex Doe" --email alex@example.com --phone "+1 555 0100"
//!
//! # Target another backend
//! crm --server http://127.0.0.1:8000 login --email alex@example.com
//! ```

mod cli;
mod commands;
mod error;
mod logger;
mod login;
mod profile;
mod profile_commands;

use crate::{cli::Cli, commands::Commands, profile_commands::ProfileCommands};

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use crm_client::HttpBackend;
use crm_config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Flags beat config and environment.
    if let Some(server) = cli.server {
        config.backend.base_url = server;
    }
    if let Some(user_id) = cli.user_id {
        config.backend.user_id = Some(user_id);
    }

    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    if let Err(e) = logger::initialize(
        config.logging.level,
        config.logging.file.clone().map(Into::into),
        config.logging.colored,
    ) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    config.log_summary();

    let backend = match HttpBackend::new(
        &config.backend.base_url,
        config.backend.user_id.as_deref(),
        config.backend.request_timeout(),
    ) {
        Ok(backend) => Arc::new(backend),
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Login { email } => login::run(backend, config.otp.clone(), &email).await,

        Commands::Profile { action } => match action {
            ProfileCommands::Save { name, email, phone } => {
                profile::save(backend, &config, name, email, phone).await
            }
        },
    };

    // Handle result
    match result {
        Ok(value) => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(hint) = e.recovery_hint() {
                eprintln!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}
