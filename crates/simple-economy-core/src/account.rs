//! Account types for simple-economy.
//!
//! This module defines the per-player ledger entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountKey, Money};

/// A player's ledger entry.
///
/// Accounts are created lazily the first time a username is looked up and are
/// never removed. `total_earned` and `total_spent` are informational running
/// totals; the balance is never derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The username with the casing it was first seen with.
    pub username: String,

    /// Current balance. Kept within `0..=max_balance` by the ledger.
    pub balance: Money,

    /// When the account was last read or written.
    pub last_seen: DateTime<Utc>,

    /// Everything ever credited to the account, including the starting balance.
    pub total_earned: Money,

    /// Everything ever debited from the account.
    pub total_spent: Money,
}

impl Account {
    /// Create a new account seeded with a starting balance.
    ///
    /// The starting balance counts towards `total_earned`.
    #[must_use]
    pub fn new(username: impl Into<String>, starting_balance: Money) -> Self {
        Self {
            username: username.into(),
            balance: starting_balance,
            last_seen: Utc::now(),
            total_earned: starting_balance,
            total_spent: Money::ZERO,
        }
    }

    /// The canonical key this account is stored under.
    #[must_use]
    pub fn key(&self) -> AccountKey {
        AccountKey::new(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_is_seeded() {
        let account = Account::new("TestPlayer", Money::from_units(1000));
        assert_eq!(account.username, "TestPlayer");
        assert_eq!(account.balance, Money::from_units(1000));
        assert_eq!(account.total_earned, Money::from_units(1000));
        assert_eq!(account.total_spent, Money::ZERO);
        assert_eq!(account.key().as_str(), "testplayer");
    }

    #[test]
    fn document_shape() {
        let account = Account::new("Steve", Money::from_units(1500));
        let value = serde_json::to_value(&account).unwrap();

        assert_eq!(value["username"], "Steve");
        assert_eq!(value["balance"], 1500.0);
        assert_eq!(value["total_earned"], 1500.0);
        assert_eq!(value["total_spent"], 0.0);
        assert!(value["last_seen"].is_string());
    }
}
