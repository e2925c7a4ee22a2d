use serde_json::Value;

/// Backend reply to an OTP verification.
#[derive(Debug, Clone, PartialEq)]
pub enum VerifyOutcome {
    /// Code accepted. Carries the backend's opaque profile-creation
    /// status, passed through unchanged for the UI to branch on.
    Success { profile_status: Option<Value> },
    /// The challenge had already expired; a fresh code must be requested
    Expired,
    /// Wrong code; the challenge stays usable
    Invalid,
}
