pub mod email_address;
pub mod profile_draft;
pub mod session_identity;
