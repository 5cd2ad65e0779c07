//! Item ownership registry.
//!
//! Tracks who owns which item. Items are minted with sequential
//! identifiers starting at zero and are never destroyed, so the set of
//! known items is exactly `0..item_count()`.

use std::collections::HashMap;

use curio_core::{AccountId, ItemId};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{TokenError, TokenResult};

/// Descriptive metadata for the item collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionMeta {
    /// Collection name.
    pub name: String,
    /// Short symbol.
    pub symbol: String,
    /// Base URI that item identifiers are appended to.
    pub base_uri: String,
}

impl CollectionMeta {
    /// Create collection metadata.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        base_uri: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            base_uri: base_uri.into(),
        }
    }
}

/// Mutable registry state behind the lock.
#[derive(Debug, Default)]
struct RegistryState {
    /// Current owner of each minted item.
    owners: HashMap<ItemId, AccountId>,
    /// Identifier the next mint will receive.
    next_id: ItemId,
}

/// Ownership registry for a single item collection.
#[derive(Debug)]
pub struct TokenRegistry {
    /// Collection metadata.
    meta: CollectionMeta,
    /// Owners and mint counter.
    state: RwLock<RegistryState>,
}

impl TokenRegistry {
    /// Create an empty registry for a collection.
    #[must_use]
    pub fn new(meta: CollectionMeta) -> Self {
        Self {
            meta,
            state: RwLock::new(RegistryState::default()),
        }
    }

    /// Get the collection metadata.
    #[must_use]
    pub const fn meta(&self) -> &CollectionMeta {
        &self.meta
    }

    /// Mint a new item owned by `owner`.
    ///
    /// Identifiers are assigned sequentially starting at zero.
    pub fn create_item(&self, owner: &AccountId) -> ItemId {
        let mut state = self.state.write();
        let item = state.next_id;
        state.next_id = item.next();
        state.owners.insert(item, owner.clone());

        info!(item = %item, owner = %owner, "item minted");
        item
    }

    /// Get the current owner of an item.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::UnknownItem` if the item has never been minted.
    pub fn owner_of(&self, item: ItemId) -> TokenResult<AccountId> {
        self.state
            .read()
            .owners
            .get(&item)
            .cloned()
            .ok_or(TokenError::UnknownItem { item })
    }

    /// Check whether `account` owns `item`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::UnknownItem` if the item has never been minted.
    pub fn is_owner(&self, item: ItemId, account: &AccountId) -> TokenResult<bool> {
        Ok(self.owner_of(item)? == *account)
    }

    /// Reassign ownership of an item from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::UnknownItem` if the item has never been
    /// minted, or `TokenError::NotOwner` if `from` is not the current
    /// owner.
    pub fn transfer(&self, item: ItemId, from: &AccountId, to: &AccountId) -> TokenResult<()> {
        let mut state = self.state.write();

        let owner = state
            .owners
            .get(&item)
            .ok_or(TokenError::UnknownItem { item })?;
        if owner != from {
            return Err(TokenError::NotOwner {
                item,
                claimed: from.clone(),
            });
        }

        state.owners.insert(item, to.clone());
        debug!(item = %item, from = %from, to = %to, "ownership reassigned");
        Ok(())
    }

    /// Render the metadata URI for an item.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::UnknownItem` if the item has never been minted.
    pub fn token_uri(&self, item: ItemId) -> TokenResult<String> {
        if !self.state.read().owners.contains_key(&item) {
            return Err(TokenError::UnknownItem { item });
        }
        Ok(format!("{}{}", self.meta.base_uri, item))
    }

    /// Number of items minted so far.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.state.read().next_id.value()
    }

    /// All items currently owned by `account`, in ascending order.
    #[must_use]
    pub fn items_of(&self, account: &AccountId) -> Vec<ItemId> {
        let state = self.state.read();
        let mut items: Vec<ItemId> = state
            .owners
            .iter()
            .filter(|(_, owner)| *owner == account)
            .map(|(item, _)| *item)
            .collect();
        items.sort_unstable();
        items
    }
}
