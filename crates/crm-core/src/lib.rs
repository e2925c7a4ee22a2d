pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use models::email_address::EmailAddress;
pub use models::profile_draft::ProfileDraft;
pub use models::session_identity::SessionIdentity;

#[cfg(test)]
mod tests;
