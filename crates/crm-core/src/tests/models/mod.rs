mod email_address;
mod profile_draft;
mod session_identity;
