//! Account identifiers.
//!
//! The identity layer that authenticates callers lives outside this
//! system; operations receive an already-resolved [`AccountId`]. The
//! identifier is opaque: it may be an address, a username, or anything
//! else the identity layer hands out.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque account identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account identifier.
    ///
    /// # Errors
    ///
    /// Returns error if the identifier is empty.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::invalid_account("identifier must not be empty"));
        }
        Ok(Self(id))
    }

    /// Get the identifier as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
