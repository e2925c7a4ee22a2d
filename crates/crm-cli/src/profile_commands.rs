use clap::Subcommand;

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Save the profile, riding out login propagation where needed
    Save {
        /// Display name
        #[arg(long)]
        name: String,
        /// Contact email
        #[arg(long)]
        email: String,
        /// Phone number
        #[arg(long)]
        phone: String,
    },
}
