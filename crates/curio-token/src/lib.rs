//! # curio-token
//!
//! Item ownership registry for the Curio marketplace ledger.
//!
//! The registry is the single source of truth for who owns which item.
//! It mints items with sequential identifiers, reassigns ownership, and
//! renders metadata URIs. Items are never destroyed.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod registry;

pub use error::{TokenError, TokenResult};
pub use registry::{CollectionMeta, TokenRegistry};
