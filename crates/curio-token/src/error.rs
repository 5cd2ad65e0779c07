//! Error types for the ownership registry.

use curio_core::{AccountId, ItemId};
use thiserror::Error;

/// Result type alias for registry operations.
pub type TokenResult<T> = std::result::Result<T, TokenError>;

/// Errors that can occur in the ownership registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The item has never been minted.
    #[error("unknown item: {item}")]
    UnknownItem {
        /// The item that was requested.
        item: ItemId,
    },

    /// The claimed owner does not own the item.
    #[error("account {claimed} does not own item {item}")]
    NotOwner {
        /// The item in question.
        item: ItemId,
        /// The account that claimed ownership.
        claimed: AccountId,
    },
}

impl TokenError {
    /// Create an unknown item error.
    #[must_use]
    pub const fn unknown_item(item: ItemId) -> Self {
        Self::UnknownItem { item }
    }

    /// Create a not-owner error.
    #[must_use]
    pub const fn not_owner(item: ItemId, claimed: AccountId) -> Self {
        Self::NotOwner { item, claimed }
    }
}
