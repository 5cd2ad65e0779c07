//! The marketplace engine.
//!
//! One `Marketplace` instance owns all trading state for a collection.
//! Every operation takes the engine lock for its full validate, mutate
//! and emit sequence, so each call is atomic and the event log is a
//! total order. Payments arrive as value parameters from the (external)
//! funds layer; payouts are returned as values the same way.
//!
//! Refunds follow two disciplines. A bidder withdrawing their own bid is
//! paid out directly inside the call. Funds displaced by someone else's
//! action (an outbid, a sale, a gift) are only ever credited to the
//! ledger, where the owner pulls them out later with [`Marketplace::withdraw`].

use std::sync::Arc;

use curio_core::{AccountId, Amount, ItemId};
use curio_token::TokenRegistry;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{MarketError, MarketResult};
use crate::events::{EventLog, EventRecord, MarketEvent};
use crate::fees::CutRate;
use crate::ledger::Ledger;
use crate::listings::{Bid, ListingBook, Offer};

/// Settlement summary for a completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleReceipt {
    /// The sold item.
    pub item: ItemId,
    /// The previous owner.
    pub seller: AccountId,
    /// The new owner.
    pub buyer: AccountId,
    /// Full sale price before the cut.
    pub price: Amount,
    /// Operator's cut.
    pub cut: Amount,
    /// Seller's proceeds after the cut.
    pub proceeds: Amount,
}

/// Mutable engine state behind the lock.
#[derive(Debug, Default)]
struct MarketState {
    ledger: Ledger,
    listings: ListingBook,
    events: EventLog,
}

/// Trading engine for one item collection.
#[derive(Debug)]
pub struct Marketplace {
    tokens: Arc<TokenRegistry>,
    operator: AccountId,
    cut_rate: CutRate,
    state: Mutex<MarketState>,
}

impl Marketplace {
    /// Create an engine over an ownership registry.
    ///
    /// The operator account and cut rate are fixed for the life of the
    /// instance.
    #[must_use]
    pub fn new(tokens: Arc<TokenRegistry>, operator: AccountId, cut_rate: CutRate) -> Self {
        Self {
            tokens,
            operator,
            cut_rate,
            state: Mutex::new(MarketState::default()),
        }
    }

    /// The ownership registry this engine trades over.
    #[must_use]
    pub fn registry(&self) -> &TokenRegistry {
        &self.tokens
    }

    /// The account collecting the cut.
    #[must_use]
    pub const fn operator(&self) -> &AccountId {
        &self.operator
    }

    /// The sale fee rate.
    #[must_use]
    pub const fn cut_rate(&self) -> CutRate {
        self.cut_rate
    }

    /// List an item for sale at a minimum price.
    ///
    /// Replaces any existing offer for the item.
    ///
    /// # Errors
    ///
    /// Returns `UnknownItem` if the item has never been minted, or
    /// `Unauthorized` if the caller does not own it.
    pub async fn offer_for_sale(
        &self,
        caller: &AccountId,
        item: ItemId,
        min_price: Amount,
    ) -> MarketResult<()> {
        let mut state = self.state.lock().await;

        let owner = self.tokens.owner_of(item)?;
        if owner != *caller {
            return Err(MarketError::owner_only());
        }

        state.listings.set_offer(item, Offer { min_price });
        state.events.push(MarketEvent::OfferCreated {
            item,
            seller: caller.clone(),
            min_price,
        });

        info!(item = %item, seller = %caller, min_price = %min_price, "item offered for sale");
        Ok(())
    }

    /// Buy an item at or above its offered price.
    ///
    /// The payment was already collected by the caller's funds layer and
    /// arrives here as a value. Any amount above the minimum is kept as
    /// part of the sale price. A pending bid on the item is refunded to
    /// its bidder through the ledger, even when the bidder is the buyer.
    ///
    /// # Errors
    ///
    /// Returns `UnknownItem` if the item has never been minted,
    /// `ListingAbsent` if it is not offered for sale, or
    /// `InsufficientPayment` if the payment is below the minimum price.
    pub async fn buy_item(
        &self,
        caller: &AccountId,
        item: ItemId,
        payment: Amount,
    ) -> MarketResult<SaleReceipt> {
        let mut state = self.state.lock().await;

        let seller = self.tokens.owner_of(item)?;
        let offer = state
            .listings
            .offer_of(item)
            .ok_or(MarketError::ListingAbsent { item })?;
        if payment < offer.min_price {
            return Err(MarketError::InsufficientPayment {
                offered: payment,
                required: offer.min_price,
            });
        }

        state.listings.clear_offer(item);
        if let Some(displaced) = state.listings.clear_bid(item) {
            state.ledger.credit(&displaced.bidder, displaced.amount);
        }

        let cut = self.cut_rate.cut_of(payment);
        let proceeds = self.cut_rate.proceeds_of(payment);
        state.ledger.credit(&seller, proceeds);
        state.ledger.credit(&self.operator, cut);

        self.tokens.transfer(item, &seller, caller)?;

        state.events.push(MarketEvent::OwnershipApproved {
            item,
            from: seller.clone(),
            to: caller.clone(),
        });
        state.events.push(MarketEvent::OwnershipTransferred {
            item,
            from: seller.clone(),
            to: caller.clone(),
        });
        state.events.push(MarketEvent::ListingCleared { item });
        state.events.push(MarketEvent::ItemSold {
            item,
            seller: seller.clone(),
            buyer: caller.clone(),
            price: payment,
        });

        info!(
            item = %item,
            seller = %seller,
            buyer = %caller,
            price = %payment,
            cut = %cut,
            "item bought"
        );

        Ok(SaleReceipt {
            item,
            seller,
            buyer: caller.clone(),
            price: payment,
            cut,
            proceeds,
        })
    }

    /// Place a bid on an item, holding the payment with the marketplace.
    ///
    /// A previous bid on the item is refunded to its bidder through the
    /// ledger. The new bid does not have to exceed the old one.
    ///
    /// # Errors
    ///
    /// Returns `UnknownItem` if the item has never been minted,
    /// `Unauthorized` if the caller owns the item, or
    /// `InsufficientPayment` if the payment is zero.
    pub async fn enter_bid(
        &self,
        caller: &AccountId,
        item: ItemId,
        payment: Amount,
    ) -> MarketResult<()> {
        let mut state = self.state.lock().await;

        let owner = self.tokens.owner_of(item)?;
        if owner == *caller {
            return Err(MarketError::non_owner_only());
        }
        if payment.is_zero() {
            return Err(MarketError::InsufficientPayment {
                offered: Amount::ZERO,
                required: Amount::from_units(1),
            });
        }

        let replaced = state.listings.set_bid(
            item,
            Bid {
                bidder: caller.clone(),
                amount: payment,
            },
        );
        if let Some(displaced) = replaced {
            state.ledger.credit(&displaced.bidder, displaced.amount);
        }

        state.events.push(MarketEvent::BidEntered {
            item,
            bidder: caller.clone(),
            amount: payment,
        });

        info!(item = %item, bidder = %caller, amount = %payment, "bid entered");
        Ok(())
    }

    /// Sell an item to its current bidder.
    ///
    /// Clears the bid and any standing offer. The cut is taken from the
    /// bid amount exactly as in [`Marketplace::buy_item`].
    ///
    /// # Errors
    ///
    /// Returns `UnknownItem` if the item has never been minted,
    /// `Unauthorized` if the caller does not own it, `NoBid` if no bid
    /// is active, or `BidBelowMinimum` if the bid is under `min_price`.
    pub async fn accept_bid(
        &self,
        caller: &AccountId,
        item: ItemId,
        min_price: Amount,
    ) -> MarketResult<SaleReceipt> {
        let mut state = self.state.lock().await;

        let owner = self.tokens.owner_of(item)?;
        if owner != *caller {
            return Err(MarketError::owner_only());
        }
        let bid = state
            .listings
            .bid_of(item)
            .cloned()
            .ok_or(MarketError::NoBid { item })?;
        if bid.amount < min_price {
            return Err(MarketError::BidBelowMinimum {
                offered: bid.amount,
                minimum: min_price,
            });
        }

        state.listings.clear_bid(item);
        state.listings.clear_offer(item);

        let cut = self.cut_rate.cut_of(bid.amount);
        let proceeds = self.cut_rate.proceeds_of(bid.amount);
        state.ledger.credit(caller, proceeds);
        state.ledger.credit(&self.operator, cut);

        self.tokens.transfer(item, caller, &bid.bidder)?;

        state.events.push(MarketEvent::OwnershipApproved {
            item,
            from: caller.clone(),
            to: bid.bidder.clone(),
        });
        state.events.push(MarketEvent::OwnershipTransferred {
            item,
            from: caller.clone(),
            to: bid.bidder.clone(),
        });
        state.events.push(MarketEvent::ListingCleared { item });
        state.events.push(MarketEvent::ItemSold {
            item,
            seller: caller.clone(),
            buyer: bid.bidder.clone(),
            price: bid.amount,
        });

        info!(
            item = %item,
            seller = %caller,
            buyer = %bid.bidder,
            price = %bid.amount,
            cut = %cut,
            "bid accepted"
        );

        Ok(SaleReceipt {
            item,
            seller: caller.clone(),
            buyer: bid.bidder,
            price: bid.amount,
            cut,
            proceeds,
        })
    }

    /// Withdraw the caller's own bid, paying it back out immediately.
    ///
    /// The returned amount goes straight back to the caller; it never
    /// touches the ledger.
    ///
    /// # Errors
    ///
    /// Returns `UnknownItem` if the item has never been minted, `NoBid`
    /// if no bid is active, or `Unauthorized` if the active bid belongs
    /// to someone else.
    pub async fn withdraw_bid(&self, caller: &AccountId, item: ItemId) -> MarketResult<Amount> {
        let mut state = self.state.lock().await;

        self.tokens.owner_of(item)?;
        let bid = state
            .listings
            .bid_of(item)
            .cloned()
            .ok_or(MarketError::NoBid { item })?;
        if bid.bidder != *caller {
            return Err(MarketError::bidder_only());
        }

        state.listings.clear_bid(item);
        state.events.push(MarketEvent::BidWithdrawn {
            item,
            bidder: caller.clone(),
            amount: bid.amount,
        });

        info!(item = %item, bidder = %caller, amount = %bid.amount, "bid withdrawn");
        Ok(bid.amount)
    }

    /// Give an item away without payment.
    ///
    /// Clears any standing offer first. A pending bid is refunded to its
    /// bidder through the ledger. No cut is taken.
    ///
    /// # Errors
    ///
    /// Returns `UnknownItem` if the item has never been minted, or
    /// `Unauthorized` if the caller does not own it.
    pub async fn transfer_item(
        &self,
        caller: &AccountId,
        to: &AccountId,
        item: ItemId,
    ) -> MarketResult<()> {
        let mut state = self.state.lock().await;

        let owner = self.tokens.owner_of(item)?;
        if owner != *caller {
            return Err(MarketError::owner_only());
        }

        if state.listings.clear_offer(item).is_some() {
            state.events.push(MarketEvent::ListingCleared { item });
        }
        if let Some(displaced) = state.listings.clear_bid(item) {
            state.ledger.credit(&displaced.bidder, displaced.amount);
        }

        self.tokens.transfer(item, caller, to)?;

        state.events.push(MarketEvent::OwnershipApproved {
            item,
            from: caller.clone(),
            to: to.clone(),
        });
        state.events.push(MarketEvent::OwnershipTransferred {
            item,
            from: caller.clone(),
            to: to.clone(),
        });

        info!(item = %item, from = %caller, to = %to, "item transferred");
        Ok(())
    }

    /// Pull the caller's full ledger balance out.
    ///
    /// # Errors
    ///
    /// Returns `NoBalance` if the caller has nothing to withdraw.
    pub async fn withdraw(&self, caller: &AccountId) -> MarketResult<Amount> {
        let mut state = self.state.lock().await;

        let amount = state.ledger.debit_all(caller)?;
        state.events.push(MarketEvent::BalanceWithdrawn {
            account: caller.clone(),
            amount,
        });

        info!(account = %caller, amount = %amount, "balance withdrawn");
        Ok(amount)
    }

    /// An account's current withdrawable ledger balance.
    pub async fn withdraw_balance_of(&self, account: &AccountId) -> Amount {
        let state = self.state.lock().await;
        let balance = state.ledger.balance_of(account);
        debug!(account = %account, balance = %balance, "balance queried");
        balance
    }

    /// The active offer for an item, if any.
    pub async fn offer_of(&self, item: ItemId) -> Option<Offer> {
        self.state.lock().await.listings.offer_of(item)
    }

    /// The active bid for an item, if any.
    pub async fn bid_of(&self, item: ItemId) -> Option<Bid> {
        self.state.lock().await.listings.bid_of(item).cloned()
    }

    /// Everything the marketplace currently holds for others: ledger
    /// balances plus funds backing active bids.
    pub async fn escrow_total(&self) -> Amount {
        let state = self.state.lock().await;
        state
            .ledger
            .total()
            .saturating_add(state.listings.bid_total())
    }

    /// Copy of the full event log.
    pub async fn events(&self) -> Vec<EventRecord> {
        self.state.lock().await.events.snapshot()
    }

    /// Drain the event log.
    pub async fn take_events(&self) -> Vec<EventRecord> {
        self.state.lock().await.events.take()
    }

    /// Sequence number the next event will receive.
    pub async fn next_event_seq(&self) -> u64 {
        self.state.lock().await.events.next_seq()
    }

    /// Names of events at or after `seq`, in log order.
    pub async fn event_names_since(&self, seq: u64) -> Vec<&'static str> {
        self.state.lock().await.events.names_since(seq)
    }
}
