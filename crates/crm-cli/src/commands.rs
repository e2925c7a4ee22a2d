use crate::profile_commands::ProfileCommands;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Log in with a one-time passcode
    Login {
        /// Email address to send the code to
        #[arg(long)]
        email: String,
    },

    /// Profile operations
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
}
