//! Market event log.
//!
//! Every state-changing operation appends events here in a fixed order
//! while the engine lock is held, so the log is a total order over
//! everything that ever happened. Consumers read it; nothing in this
//! crate formats or ships it anywhere.

use chrono::{DateTime, Utc};
use curio_core::{AccountId, Amount, ItemId};
use serde::{Deserialize, Serialize};

/// A marketplace state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// An owner listed an item for sale.
    OfferCreated {
        /// The listed item.
        item: ItemId,
        /// The listing owner.
        seller: AccountId,
        /// Minimum acceptable price.
        min_price: Amount,
    },

    /// A bid was placed on an item.
    BidEntered {
        /// The item bid on.
        item: ItemId,
        /// The bidding account.
        bidder: AccountId,
        /// Funds held for the bid.
        amount: Amount,
    },

    /// A bidder voluntarily withdrew their bid.
    BidWithdrawn {
        /// The item the bid was on.
        item: ItemId,
        /// The withdrawing bidder.
        bidder: AccountId,
        /// Amount paid back out.
        amount: Amount,
    },

    /// An item's sale listing was removed.
    ListingCleared {
        /// The delisted item.
        item: ItemId,
    },

    /// An item was sold.
    ItemSold {
        /// The sold item.
        item: ItemId,
        /// The previous owner.
        seller: AccountId,
        /// The new owner.
        buyer: AccountId,
        /// Full sale price before the cut.
        price: Amount,
    },

    /// An account pulled its ledger balance out.
    BalanceWithdrawn {
        /// The withdrawing account.
        account: AccountId,
        /// Amount paid out.
        amount: Amount,
    },

    /// An ownership change was cleared to proceed.
    OwnershipApproved {
        /// The item changing hands.
        item: ItemId,
        /// The current owner.
        from: AccountId,
        /// The approved recipient.
        to: AccountId,
    },

    /// An item changed owner.
    OwnershipTransferred {
        /// The item that changed hands.
        item: ItemId,
        /// The previous owner.
        from: AccountId,
        /// The new owner.
        to: AccountId,
    },
}

impl MarketEvent {
    /// The event's variant name, for sequence assertions.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OfferCreated { .. } => "OfferCreated",
            Self::BidEntered { .. } => "BidEntered",
            Self::BidWithdrawn { .. } => "BidWithdrawn",
            Self::ListingCleared { .. } => "ListingCleared",
            Self::ItemSold { .. } => "ItemSold",
            Self::BalanceWithdrawn { .. } => "BalanceWithdrawn",
            Self::OwnershipApproved { .. } => "OwnershipApproved",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
        }
    }
}

/// A logged event with its position and time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Monotone position in the log, starting at zero.
    pub seq: u64,
    /// When the event was recorded.
    pub at: DateTime<Utc>,
    /// The event itself.
    pub event: MarketEvent,
}

/// Append-only event log.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    records: Vec<EventRecord>,
    next_seq: u64,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, returning its sequence number.
    pub fn push(&mut self, event: MarketEvent) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.records.push(EventRecord {
            seq,
            at: Utc::now(),
            event,
        });
        seq
    }

    /// Copy of all retained records, in order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<EventRecord> {
        self.records.clone()
    }

    /// Drain all retained records. Sequence numbers keep counting.
    pub fn take(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.records)
    }

    /// Names of retained events at or after `seq`, in order.
    #[must_use]
    pub fn names_since(&self, seq: u64) -> Vec<&'static str> {
        self.records
            .iter()
            .filter(|record| record.seq >= seq)
            .map(|record| record.event.name())
            .collect()
    }

    /// Sequence number the next event will receive.
    #[must_use]
    pub const fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log retains no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
