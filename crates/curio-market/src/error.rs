//! Error types for marketplace operations.

use curio_core::{Amount, ItemId};
use curio_token::TokenError;
use thiserror::Error;

/// Result type alias for marketplace operations.
pub type MarketResult<T> = std::result::Result<T, MarketError>;

/// Caller is not the item's owner.
pub const REASON_OWNER_ONLY: &str = "allowed just for owner";

/// Caller is the item's owner but must not be.
pub const REASON_NON_OWNER_ONLY: &str = "allowed just for non owner";

/// Caller is not the current bidder.
pub const REASON_BIDDER_ONLY: &str = "allowed just for bidder";

/// Errors that can occur in marketplace operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarketError {
    /// Caller is not permitted to perform the operation.
    #[error("{reason}")]
    Unauthorized {
        /// Why the caller was rejected.
        reason: &'static str,
    },

    /// The item is not offered for sale.
    #[error("item {item} is not offered for sale")]
    ListingAbsent {
        /// The item that was requested.
        item: ItemId,
    },

    /// Payment does not meet the required amount.
    #[error("insufficient payment: offered {offered}, required {required}")]
    InsufficientPayment {
        /// Amount the caller offered.
        offered: Amount,
        /// Amount required for the operation.
        required: Amount,
    },

    /// No active bid exists for the item.
    #[error("no active bid for item {item}")]
    NoBid {
        /// The item that was requested.
        item: ItemId,
    },

    /// The active bid is below the required minimum.
    #[error("bid below minimum: offered {offered}, minimum {minimum}")]
    BidBelowMinimum {
        /// Amount of the active bid.
        offered: Amount,
        /// Minimum the owner demanded.
        minimum: Amount,
    },

    /// The caller has nothing to withdraw.
    #[error("you got no balance to withdraw")]
    NoBalance,

    /// The item has never been minted.
    #[error("unknown item: {item}")]
    UnknownItem {
        /// The item that was requested.
        item: ItemId,
    },

    /// Ownership registry rejected the transfer.
    #[error("caller does not own item {item}")]
    NotOwner {
        /// The item in question.
        item: ItemId,
    },

    /// Cut rate exceeds the basis-point scale.
    #[error("invalid cut rate: {bps} basis points exceeds 10000")]
    InvalidCutRate {
        /// The rejected rate.
        bps: u16,
    },
}

impl MarketError {
    /// Owner-only operation attempted by a non-owner.
    #[must_use]
    pub const fn owner_only() -> Self {
        Self::Unauthorized {
            reason: REASON_OWNER_ONLY,
        }
    }

    /// Non-owner-only operation attempted by the owner.
    #[must_use]
    pub const fn non_owner_only() -> Self {
        Self::Unauthorized {
            reason: REASON_NON_OWNER_ONLY,
        }
    }

    /// Bidder-only operation attempted by someone else.
    #[must_use]
    pub const fn bidder_only() -> Self {
        Self::Unauthorized {
            reason: REASON_BIDDER_ONLY,
        }
    }
}

impl From<TokenError> for MarketError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::UnknownItem { item } => Self::UnknownItem { item },
            TokenError::NotOwner { item, .. } => Self::NotOwner { item },
        }
    }
}
