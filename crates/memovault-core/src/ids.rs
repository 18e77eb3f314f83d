//! Identifier types for the MemoVault ledger.
//!
//! User identifiers come from the identity provider and are opaque: the ledger only
//! requires them to be usable as a storage key suffix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum accepted length of a user identifier.
pub const MAX_USER_ID_LEN: usize = 128;

/// A user identifier (the `sub` claim issued by the identity provider).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a user identifier after validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty, too long, or contains
    /// whitespace or control characters.
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        if value.len() > MAX_USER_ID_LEN {
            return Err(IdError::TooLong { len: value.len() });
        }
        if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(IdError::InvalidCharacter);
        }
        Ok(Self(value))
    }

    /// Generate a new random identifier (primarily for testing).
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UserId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is empty.
    #[error("empty identifier")]
    Empty,

    /// The input exceeds the maximum length.
    #[error("identifier too long: {len} bytes")]
    TooLong {
        /// Length of the rejected input.
        len: usize,
    },

    /// The input contains whitespace or control characters.
    #[error("identifier contains whitespace or control characters")]
    InvalidCharacter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_provider_style_ids() {
        let id = UserId::new("kX9bQ2mZ7TfU0aLw3RcYp8Hd1vE2").unwrap();
        assert_eq!(id.as_str(), "kX9bQ2mZ7TfU0aLw3RcYp8Hd1vE2");
        assert_eq!(id.to_string(), "kX9bQ2mZ7TfU0aLw3RcYp8Hd1vE2");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert_eq!(UserId::new(""), Err(IdError::Empty));
        assert_eq!(UserId::new("a b"), Err(IdError::InvalidCharacter));
        assert_eq!(UserId::new("abc\n"), Err(IdError::InvalidCharacter));
    }

    #[test]
    fn rejects_overlong() {
        let long = "x".repeat(MAX_USER_ID_LEN + 1);
        assert_eq!(
            UserId::new(long),
            Err(IdError::TooLong {
                len: MAX_USER_ID_LEN + 1
            })
        );
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(UserId::generate(), UserId::generate());
    }

    #[test]
    fn serde_rejects_invalid() {
        assert!(serde_json::from_str::<UserId>("\"\"").is_err());
        let id: UserId = serde_json::from_str("\"user-1\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"user-1\"");
    }
}
