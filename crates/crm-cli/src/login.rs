//! Interactive OTP login flow.

use std::io::{self, Write};
use std::sync::Arc;

use serde_json::{Value, json};

use crate::error::{CliError, CliResult};
use crm_client::HttpBackend;
use crm_config::OtpConfig;
use crm_session::{OtpController, OtpError, OtpPhase};

pub(crate) async fn run(
    backend: Arc<HttpBackend>,
    config: OtpConfig,
    email: &str,
) -> CliResult<Value> {
    let mut controller = OtpController::new(backend, config);

    controller.generate(email).await?;
    announce_code(&controller);

    loop {
        if controller.phase() == OtpPhase::Expired {
            println!("The code has expired. Type 'resend' to get a new one.");
        } else if let Some(countdown) = controller.countdown() {
            println!("Time remaining: {}s", countdown.borrow().remaining_secs);
        }

        let input = prompt("Enter code ('resend' for a new one, 'quit' to abort): ")?;

        match input.as_str() {
            "quit" => {
                controller.abandon();
                return Err(CliError::aborted("login abandoned"));
            }
            "resend" => {
                controller.resend(email).await?;
                announce_code(&controller);
            }
            code => match controller.verify(email, code).await {
                Ok(profile_status) => {
                    return Ok(json!({
                        "status": "verified",
                        "profile_status": profile_status,
                    }));
                }
                Err(err)
                    if matches!(
                        err,
                        OtpError::OtpInvalid { .. } | OtpError::OtpExpired { .. }
                    ) =>
                {
                    println!("{err}");
                    println!("{}", err.recovery_hint());
                }
                Err(err) => return Err(err.into()),
            },
        }
    }
}

/// Delivery is simulated, so surface the issued code directly.
fn announce_code(controller: &OtpController) {
    if let Some(code) = controller.issued_code() {
        println!("Code sent. (simulated delivery: {code})");
    }
}

fn prompt(label: &str) -> CliResult<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut input = String::new();
    let bytes = io::stdin().read_line(&mut input)?;
    if bytes == 0 {
        return Err(CliError::input("stdin closed"));
    }

    Ok(input.trim().to_string())
}
