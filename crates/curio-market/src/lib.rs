//! # curio-market
//!
//! Trading, escrow and settlement engine for the Curio marketplace ledger.
//!
//! This crate provides:
//!
//! - [`Marketplace`] - The engine implementing offer, bid, sale, gift and
//!   withdrawal operations over a shared [`curio_token::TokenRegistry`]
//! - [`Ledger`] - Pull-style withdrawable balance store
//! - [`ListingBook`] - Per-item offer and bid registry
//! - [`CutRate`] - Basis-point operator fee policy
//! - [`EventLog`] - Ordered record of every state change

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod fees;
pub mod ledger;
pub mod listings;
pub mod marketplace;

pub use error::{MarketError, MarketResult};
pub use events::{EventLog, EventRecord, MarketEvent};
pub use fees::CutRate;
pub use ledger::Ledger;
pub use listings::{Bid, ListingBook, Offer};
pub use marketplace::{Marketplace, SaleReceipt};
