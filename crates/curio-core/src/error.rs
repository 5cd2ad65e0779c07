//! Error types for Curio primitives.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur when constructing core primitives.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid account identifier.
    #[error("invalid account: {message}")]
    InvalidAccount {
        /// Description of the account error.
        message: String,
    },
}

impl CoreError {
    /// Create an invalid account error.
    #[must_use]
    pub fn invalid_account(message: impl Into<String>) -> Self {
        Self::InvalidAccount {
            message: message.into(),
        }
    }
}
