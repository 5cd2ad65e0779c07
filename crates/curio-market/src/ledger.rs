//! Withdrawable balance store.
//!
//! The ledger holds funds the marketplace owes to accounts: seller
//! proceeds, operator cuts and refunds of displaced bids. Accounts pull
//! their balance out with a single all-or-nothing debit; there is no
//! partial withdrawal.

use std::collections::HashMap;

use curio_core::{AccountId, Amount};
use serde::{Deserialize, Serialize};

use crate::error::{MarketError, MarketResult};

/// Withdrawable balances per account.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Ledger {
    balances: HashMap<AccountId, Amount>,
}

impl Ledger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to an account's withdrawable balance.
    ///
    /// Crediting zero is a no-op and does not create an entry.
    pub fn credit(&mut self, account: &AccountId, amount: Amount) {
        if amount.is_zero() {
            return;
        }
        let balance = self.balances.entry(account.clone()).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Zero an account's balance and return the full amount.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::NoBalance` if the account has nothing to
    /// withdraw.
    pub fn debit_all(&mut self, account: &AccountId) -> MarketResult<Amount> {
        match self.balances.remove(account) {
            Some(amount) if !amount.is_zero() => Ok(amount),
            _ => Err(MarketError::NoBalance),
        }
    }

    /// Get an account's withdrawable balance.
    #[must_use]
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Sum of all withdrawable balances.
    #[must_use]
    pub fn total(&self) -> Amount {
        self.balances.values().copied().sum()
    }

    /// Number of accounts with a non-zero balance.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.balances.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str) -> AccountId {
        AccountId::new(id).expect("should create account")
    }

    #[test]
    fn test_credit_and_balance() {
        let mut ledger = Ledger::new();
        let alice = account("alice");

        ledger.credit(&alice, Amount::from_units(100));
        assert_eq!(ledger.balance_of(&alice), Amount::from_units(100));

        ledger.credit(&alice, Amount::from_units(50));
        assert_eq!(ledger.balance_of(&alice), Amount::from_units(150));
    }

    #[test]
    fn test_balance_of_unknown_account_is_zero() {
        let ledger = Ledger::new();
        assert!(ledger.balance_of(&account("nobody")).is_zero());
    }

    #[test]
    fn test_credit_zero_is_noop() {
        let mut ledger = Ledger::new();
        let alice = account("alice");

        ledger.credit(&alice, Amount::ZERO);
        assert_eq!(ledger.account_count(), 0);
        assert!(ledger.balance_of(&alice).is_zero());
    }

    #[test]
    fn test_debit_all_returns_full_amount() {
        let mut ledger = Ledger::new();
        let alice = account("alice");

        ledger.credit(&alice, Amount::from_units(300));
        let amount = ledger.debit_all(&alice).unwrap();

        assert_eq!(amount, Amount::from_units(300));
        assert!(ledger.balance_of(&alice).is_zero());
    }

    #[test]
    fn test_debit_all_empty_fails() {
        let mut ledger = Ledger::new();
        let result = ledger.debit_all(&account("alice"));
        assert_eq!(result, Err(MarketError::NoBalance));
    }

    #[test]
    fn test_debit_all_twice_fails() {
        let mut ledger = Ledger::new();
        let alice = account("alice");

        ledger.credit(&alice, Amount::from_units(10));
        ledger.debit_all(&alice).unwrap();

        assert_eq!(ledger.debit_all(&alice), Err(MarketError::NoBalance));
    }

    #[test]
    fn test_total() {
        let mut ledger = Ledger::new();
        ledger.credit(&account("alice"), Amount::from_units(100));
        ledger.credit(&account("bob"), Amount::from_units(200));

        assert_eq!(ledger.total(), Amount::from_units(300));
    }

    #[test]
    fn test_credit_saturates() {
        let mut ledger = Ledger::new();
        let alice = account("alice");

        ledger.credit(&alice, Amount::MAX);
        ledger.credit(&alice, Amount::from_units(1));
        assert_eq!(ledger.balance_of(&alice), Amount::MAX);
    }
}
