//! Identifier types for message authors
//!
//! Authors are keyed by the handle the producer emits (e.g. "@alice").
//! The only structural rule is that the key is non-empty.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::errors::MessageError;

/// Author identifier
///
/// Transparent over the raw handle string. Deserialization rejects an
/// empty string so an `AuthorId` is always a usable map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AuthorId(String);

impl AuthorId {
    /// Create an AuthorId, rejecting empty handles
    pub fn try_new(handle: impl Into<String>) -> Result<Self, MessageError> {
        let s = handle.into();
        if s.is_empty() {
            return Err(MessageError::EmptyAuthor);
        }
        Ok(Self(s))
    }

    /// Get the handle string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AuthorId {
    type Error = MessageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl TryFrom<&str> for AuthorId {
    type Error = MessageError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<AuthorId> for String {
    fn from(id: AuthorId) -> Self {
        id.0
    }
}

impl Borrow<str> for AuthorId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AuthorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
