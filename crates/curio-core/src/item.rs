//! Item identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique item identifier.
///
/// Identifiers are assigned sequentially at mint time, starting at zero,
/// and are never reused. Items are never destroyed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct ItemId(u64);

impl ItemId {
    /// Create an item identifier from its raw index.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The identifier that follows this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
