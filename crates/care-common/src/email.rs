//! Email value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated, normalized e-mail address.
///
/// Stored trimmed and lowercased. Validation is structural only (one `@`,
/// non-empty local part, dotted domain); deliverability is the mail
/// collaborator's problem.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Result<Self, EmailError> {
        let value = value.into().trim().to_lowercase();

        if value.is_empty() {
            return Err(EmailError::Empty);
        }

        let (local, domain) = value.split_once('@').ok_or(EmailError::InvalidFormat)?;
        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
        {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Domain part (after the `@`).
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, d)| d).unwrap_or("")
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("invalid email format")]
    InvalidFormat,
}
