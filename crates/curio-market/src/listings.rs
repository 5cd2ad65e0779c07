//! Per-item offer and bid registry.
//!
//! Each item has at most one active offer and at most one active bid,
//! tracked independently. The book stores state only; authorization,
//! refunds and settlement are the engine's job.

use std::collections::HashMap;

use curio_core::{AccountId, Amount, ItemId};
use serde::{Deserialize, Serialize};

/// A standing offer to sell an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Minimum price the owner will accept.
    pub min_price: Amount,
}

/// An active bid on an item, with funds held by the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    /// Account that placed the bid.
    pub bidder: AccountId,
    /// Amount held for the bid.
    pub amount: Amount,
}

/// Offers and bids for all items.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ListingBook {
    offers: HashMap<ItemId, Offer>,
    bids: HashMap<ItemId, Bid>,
}

impl ListingBook {
    /// Create an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an offer for an item, replacing any existing one.
    pub fn set_offer(&mut self, item: ItemId, offer: Offer) {
        self.offers.insert(item, offer);
    }

    /// Remove the offer for an item, returning it if present.
    pub fn clear_offer(&mut self, item: ItemId) -> Option<Offer> {
        self.offers.remove(&item)
    }

    /// Get the active offer for an item.
    #[must_use]
    pub fn offer_of(&self, item: ItemId) -> Option<Offer> {
        self.offers.get(&item).copied()
    }

    /// Record a bid for an item, returning the bid it replaced.
    ///
    /// The caller is responsible for refunding the returned bid.
    pub fn set_bid(&mut self, item: ItemId, bid: Bid) -> Option<Bid> {
        self.bids.insert(item, bid)
    }

    /// Remove the bid for an item, returning it if present.
    pub fn clear_bid(&mut self, item: ItemId) -> Option<Bid> {
        self.bids.remove(&item)
    }

    /// Get the active bid for an item.
    #[must_use]
    pub fn bid_of(&self, item: ItemId) -> Option<&Bid> {
        self.bids.get(&item)
    }

    /// Sum of all funds held for active bids.
    #[must_use]
    pub fn bid_total(&self) -> Amount {
        self.bids.values().map(|bid| bid.amount).sum()
    }

    /// Number of items with an active offer.
    #[must_use]
    pub fn offer_count(&self) -> usize {
        self.offers.len()
    }

    /// Number of items with an active bid.
    #[must_use]
    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str) -> AccountId {
        AccountId::new(id).expect("should create account")
    }

    #[test]
    fn test_set_and_clear_offer() {
        let mut book = ListingBook::new();
        let item = ItemId::new(0);
        let offer = Offer {
            min_price: Amount::from_units(100),
        };

        book.set_offer(item, offer);
        assert_eq!(book.offer_of(item), Some(offer));
        assert_eq!(book.offer_count(), 1);

        assert_eq!(book.clear_offer(item), Some(offer));
        assert_eq!(book.offer_of(item), None);
        assert_eq!(book.clear_offer(item), None);
    }

    #[test]
    fn test_set_offer_replaces() {
        let mut book = ListingBook::new();
        let item = ItemId::new(0);

        book.set_offer(
            item,
            Offer {
                min_price: Amount::from_units(100),
            },
        );
        book.set_offer(
            item,
            Offer {
                min_price: Amount::from_units(200),
            },
        );

        assert_eq!(
            book.offer_of(item).unwrap().min_price,
            Amount::from_units(200)
        );
        assert_eq!(book.offer_count(), 1);
    }

    #[test]
    fn test_set_bid_returns_replaced() {
        let mut book = ListingBook::new();
        let item = ItemId::new(0);
        let first = Bid {
            bidder: account("alice"),
            amount: Amount::from_units(100),
        };
        let second = Bid {
            bidder: account("bob"),
            amount: Amount::from_units(150),
        };

        assert_eq!(book.set_bid(item, first.clone()), None);
        assert_eq!(book.set_bid(item, second.clone()), Some(first));
        assert_eq!(book.bid_of(item), Some(&second));
    }

    #[test]
    fn test_clear_bid() {
        let mut book = ListingBook::new();
        let item = ItemId::new(0);
        let bid = Bid {
            bidder: account("alice"),
            amount: Amount::from_units(100),
        };

        book.set_bid(item, bid.clone());
        assert_eq!(book.clear_bid(item), Some(bid));
        assert_eq!(book.bid_of(item), None);
    }

    #[test]
    fn test_offer_and_bid_are_independent() {
        let mut book = ListingBook::new();
        let item = ItemId::new(0);

        book.set_offer(
            item,
            Offer {
                min_price: Amount::from_units(100),
            },
        );
        book.set_bid(
            item,
            Bid {
                bidder: account("alice"),
                amount: Amount::from_units(80),
            },
        );

        book.clear_offer(item);
        assert!(book.bid_of(item).is_some());

        book.clear_bid(item);
        assert_eq!(book.bid_count(), 0);
    }

    #[test]
    fn test_bid_total() {
        let mut book = ListingBook::new();

        book.set_bid(
            ItemId::new(0),
            Bid {
                bidder: account("alice"),
                amount: Amount::from_units(100),
            },
        );
        book.set_bid(
            ItemId::new(1),
            Bid {
                bidder: account("bob"),
                amount: Amount::from_units(250),
            },
        );

        assert_eq!(book.bid_total(), Amount::from_units(350));
    }

    #[test]
    fn test_empty_book() {
        let book = ListingBook::new();
        assert!(book.bid_total().is_zero());
        assert_eq!(book.offer_count(), 0);
        assert_eq!(book.bid_count(), 0);
    }
}
