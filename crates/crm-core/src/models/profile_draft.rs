//! Profile fields captured from the profile form.

use serde::{Deserialize, Serialize};

/// The profile fields a user may save.
///
/// Fields are carried as entered; the backend owns canonicalization.
/// The email here is form data, not a login credential, so it is not
/// forced through [`crate::EmailAddress`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ProfileDraft {
    /// Create a new profile draft
    pub fn new(name: String, email: String, phone: String) -> Self {
        Self { name, email, phone }
    }
}
