use crate::commands::Commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "crm")]
#[command(about = "CRM client: OTP login and resilient profile saves")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Backend URL (overrides the configured base URL)
    #[arg(long, global = true)]
    pub(crate) server: Option<String>,

    /// User ID sent with every request
    #[arg(long, global = true)]
    pub(crate) user_id: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub(crate) pretty: bool,
}
