//! Operator cut policy.
//!
//! The cut is a flat fraction of every sale price, expressed in basis
//! points of 10000. All arithmetic is integer fixed-point with `u128`
//! intermediates and floor rounding, so the cut and the seller proceeds
//! always recompose to the exact sale price.

use curio_core::Amount;
use serde::{Deserialize, Serialize};

use crate::error::{MarketError, MarketResult};

/// Basis points in one whole.
const BPS_SCALE: u128 = 10_000;

/// A sale fee rate in basis points of 10000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutRate {
    bps: u16,
}

impl CutRate {
    /// No fee.
    pub const ZERO: Self = Self { bps: 0 };

    /// Create a cut rate from basis points.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidCutRate` if `bps` exceeds 10000.
    pub const fn new(bps: u16) -> MarketResult<Self> {
        if bps > BPS_SCALE as u16 {
            return Err(MarketError::InvalidCutRate { bps });
        }
        Ok(Self { bps })
    }

    /// Get the rate in basis points.
    #[must_use]
    pub const fn bps(&self) -> u16 {
        self.bps
    }

    /// The operator's cut of a sale price.
    ///
    /// Computed as `price * bps / 10000` with floor rounding, so
    /// `cut_of(p) + proceeds_of(p) == p` holds exactly.
    #[must_use]
    pub const fn cut_of(&self, price: Amount) -> Amount {
        let numerator = price.units() as u128 * self.bps as u128;
        // Cannot exceed u64::MAX since bps <= 10000.
        Amount::from_units((numerator / BPS_SCALE) as u64)
    }

    /// The seller's proceeds after the cut.
    #[must_use]
    pub const fn proceeds_of(&self, price: Amount) -> Amount {
        price.saturating_sub(self.cut_of(price))
    }
}
