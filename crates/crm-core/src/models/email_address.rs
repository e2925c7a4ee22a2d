//! Validated email address used for OTP login and profile data.

use crate::{CoreError, Result};

use std::fmt;

use serde::{Deserialize, Serialize};

/// An email address that has passed the `local@domain.tld` shape check.
///
/// This is deliberately a shape check, not full RFC 5322 parsing: the
/// backend is the authority on deliverability. The check exists so that
/// obviously malformed input is rejected before any OTP request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse and validate an email address.
    ///
    /// Requires a non-empty local part, exactly one `@`, and a domain
    /// containing at least one dot with no empty labels. Surrounding
    /// whitespace is trimmed; embedded whitespace is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let value = raw.trim();

        if value.is_empty() {
            return Err(CoreError::validation("email address is empty"));
        }

        if value.chars().any(char::is_whitespace) {
            return Err(CoreError::validation(format!(
                "email address contains whitespace: {value}"
            )));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(CoreError::validation(format!(
                "email address is missing '@': {value}"
            )));
        };

        if local.is_empty() {
            return Err(CoreError::validation(format!(
                "email address has an empty local part: {value}"
            )));
        }

        if domain.contains('@') {
            return Err(CoreError::validation(format!(
                "email address contains multiple '@': {value}"
            )));
        }

        if !domain.contains('.') {
            return Err(CoreError::validation(format!(
                "email domain is missing '.': {value}"
            )));
        }

        if domain.split('.').any(str::is_empty) {
            return Err(CoreError::validation(format!(
                "email domain has an empty label: {value}"
            )));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
