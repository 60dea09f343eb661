//! The account map and its atomic balance operations.
//!
//! All accounts live in one map behind a single reader/writer lock. Every
//! operation performs its lookup, checks and mutation inside one critical
//! section, so no caller can observe a half-applied operation. Lookups of
//! existing accounts only take the read lock; `last_seen` is an atomic so it
//! can be refreshed without exclusive access.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use simple_economy_core::{Account, AccountKey, EconomyConfig, LedgerError, Money, Result};

/// Balance bounds applied to every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Starting balance for accounts created on lookup.
    pub default_balance: Money,
    /// Ceiling for any balance.
    pub max_balance: Money,
}

impl From<&EconomyConfig> for Limits {
    fn from(config: &EconomyConfig) -> Self {
        Self {
            default_balance: config.default_balance,
            max_balance: config.max_balance,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::from(&EconomyConfig::default())
    }
}

/// A consistent copy of every account, tagged with the store version it was taken at.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Store version at the time of the copy.
    pub version: u64,
    /// Every account with its canonical key.
    pub accounts: Vec<(AccountKey, Account)>,
}

/// In-map representation of an account.
#[derive(Debug)]
struct Slot {
    username: String,
    balance: Money,
    total_earned: Money,
    total_spent: Money,
    last_seen_ms: AtomicI64,
}

impl Slot {
    fn from_account(account: Account) -> Self {
        Self {
            username: account.username,
            balance: account.balance,
            total_earned: account.total_earned,
            total_spent: account.total_spent,
            last_seen_ms: AtomicI64::new(account.last_seen.timestamp_millis()),
        }
    }

    fn touch(&self) {
        self.last_seen_ms
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    fn to_account(&self) -> Account {
        let last_seen = DateTime::from_timestamp_millis(self.last_seen_ms.load(Ordering::Relaxed))
            .unwrap_or_default();
        Account {
            username: self.username.clone(),
            balance: self.balance,
            last_seen,
            total_earned: self.total_earned,
            total_spent: self.total_spent,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<AccountKey, Slot>,
    limits: Limits,
    /// Bumped by every change that can affect the ranking.
    version: u64,
}

impl Inner {
    /// Look up an account, creating it with the default balance if absent.
    ///
    /// Runs under the write lock, so concurrent callers for the same unknown
    /// username always end up with the same single account.
    fn slot_mut(&mut self, username: &str) -> &mut Slot {
        let Self {
            accounts,
            limits,
            version,
        } = self;
        let slot = accounts.entry(AccountKey::new(username)).or_insert_with(|| {
            *version += 1;
            tracing::debug!(username, balance = %limits.default_balance, "Account created");
            Slot::from_account(Account::new(username, limits.default_balance))
        });
        slot.touch();
        slot
    }
}

fn ensure_positive(amount: Money) -> Result<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount { amount })
    }
}

/// The single source of truth for balances.
#[derive(Debug, Default)]
pub struct AccountStore {
    inner: RwLock<Inner>,
}

impl AccountStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(limits: Limits) -> Self {
        Self {
            inner: RwLock::new(Inner {
                limits,
                ..Inner::default()
            }),
        }
    }

    /// Current balance bounds.
    #[must_use]
    pub fn limits(&self) -> Limits {
        self.inner.read().limits
    }

    /// Replace the balance bounds. Existing balances are left as they are.
    pub fn set_limits(&self, limits: Limits) {
        self.inner.write().limits = limits;
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().accounts.len()
    }

    /// Whether no account exists yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Version counter, bumped by every change that can affect the ranking.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.read().version
    }

    /// Return an account, creating it with the default balance if it does not exist.
    pub fn get_or_create(&self, username: &str) -> Account {
        let key = AccountKey::new(username);
        {
            let inner = self.inner.read();
            if let Some(slot) = inner.accounts.get(&key) {
                slot.touch();
                return slot.to_account();
            }
        }
        // Not found under the read lock: retry as a single insert-if-missing.
        self.inner.write().slot_mut(username).to_account()
    }

    /// Current balance of an account, creating it if needed.
    pub fn balance(&self, username: &str) -> Money {
        self.get_or_create(username).balance
    }

    /// Overwrite a balance.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::OutOfRange` if `amount` is outside `0..=max_balance`.
    pub fn set_balance(&self, username: &str, amount: Money) -> Result<Account> {
        let mut inner = self.inner.write();
        let max_balance = inner.limits.max_balance;
        if amount.is_negative() || amount > max_balance {
            return Err(LedgerError::OutOfRange {
                amount,
                max_balance,
            });
        }

        let slot = inner.slot_mut(username);
        slot.balance = amount;
        let account = slot.to_account();
        inner.version += 1;
        Ok(account)
    }

    /// Add money to an account.
    ///
    /// # Errors
    ///
    /// - `LedgerError::InvalidAmount` if `amount` is not positive.
    /// - `LedgerError::ExceedsMaxBalance` if the result would exceed the ceiling.
    pub fn credit(&self, username: &str, amount: Money) -> Result<Account> {
        ensure_positive(amount)?;

        let mut inner = self.inner.write();
        let max_balance = inner.limits.max_balance;
        let slot = inner.slot_mut(username);
        let balance = slot.balance;
        let new_balance = balance
            .checked_add(amount)
            .filter(|b| *b <= max_balance)
            .ok_or(LedgerError::ExceedsMaxBalance {
                balance,
                amount,
                max_balance,
            })?;

        slot.balance = new_balance;
        slot.total_earned = slot.total_earned.saturating_add(amount);
        let account = slot.to_account();
        inner.version += 1;
        Ok(account)
    }

    /// Remove money from an account.
    ///
    /// # Errors
    ///
    /// - `LedgerError::InvalidAmount` if `amount` is not positive.
    /// - `LedgerError::InsufficientFunds` if `amount` exceeds the balance.
    pub fn debit(&self, username: &str, amount: Money) -> Result<Account> {
        ensure_positive(amount)?;

        let mut inner = self.inner.write();
        let slot = inner.slot_mut(username);
        let balance = slot.balance;
        let new_balance = balance
            .checked_sub(amount)
            .filter(|b| !b.is_negative())
            .ok_or(LedgerError::InsufficientFunds {
                balance,
                required: amount,
            })?;

        slot.balance = new_balance;
        slot.total_spent = slot.total_spent.saturating_add(amount);
        let account = slot.to_account();
        inner.version += 1;
        Ok(account)
    }

    /// Move money between two accounts, all or nothing.
    ///
    /// Both legs are checked before either is applied, under one write lock.
    /// Returns the updated `(from, to)` accounts.
    ///
    /// # Errors
    ///
    /// - `LedgerError::InvalidAmount` if `amount` is not positive.
    /// - `LedgerError::SameAccount` if both names refer to one account.
    /// - `LedgerError::InsufficientFunds` if `from` cannot cover `amount`.
    /// - `LedgerError::ExceedsMaxBalance` if `to` would exceed the ceiling.
    pub fn transfer(&self, from: &str, to: &str, amount: Money) -> Result<(Account, Account)> {
        ensure_positive(amount)?;
        if AccountKey::same_account(from, to) {
            return Err(LedgerError::SameAccount {
                username: from.to_string(),
            });
        }

        let mut inner = self.inner.write();
        let max_balance = inner.limits.max_balance;
        let from_balance = inner.slot_mut(from).balance;
        let to_balance = inner.slot_mut(to).balance;

        let new_from = from_balance
            .checked_sub(amount)
            .filter(|b| !b.is_negative())
            .ok_or(LedgerError::InsufficientFunds {
                balance: from_balance,
                required: amount,
            })?;
        let new_to = to_balance
            .checked_add(amount)
            .filter(|b| *b <= max_balance)
            .ok_or(LedgerError::ExceedsMaxBalance {
                balance: to_balance,
                amount,
                max_balance,
            })?;

        let from_slot = inner.slot_mut(from);
        from_slot.balance = new_from;
        from_slot.total_spent = from_slot.total_spent.saturating_add(amount);
        let from_account = from_slot.to_account();

        let to_slot = inner.slot_mut(to);
        to_slot.balance = new_to;
        to_slot.total_earned = to_slot.total_earned.saturating_add(amount);
        let to_account = to_slot.to_account();

        inner.version += 1;
        Ok((from_account, to_account))
    }

    /// Copy every account under one read lock.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let inner = self.inner.read();
        Snapshot {
            version: inner.version,
            accounts: inner
                .accounts
                .iter()
                .map(|(key, slot)| (key.clone(), slot.to_account()))
                .collect(),
        }
    }

    /// Account count and the sum of all balances, read consistently.
    #[must_use]
    pub fn totals(&self) -> (usize, Money) {
        let inner = self.inner.read();
        let total = inner.accounts.values().map(|slot| slot.balance).sum();
        (inner.accounts.len(), total)
    }

    /// Replace every account, e.g. after loading a saved document.
    ///
    /// Keys are recomputed from each account's username; when two accounts
    /// share a key the later one wins. Balances outside `0..=max_balance` are
    /// clamped into range. Both cases are logged.
    pub fn replace_all(&self, accounts: impl IntoIterator<Item = Account>) {
        let mut inner = self.inner.write();
        let max_balance = inner.limits.max_balance;

        let mut loaded = HashMap::new();
        for mut account in accounts {
            let clamped = account.balance.max(Money::ZERO).min(max_balance);
            if clamped != account.balance {
                tracing::warn!(
                    username = %account.username,
                    balance = %account.balance,
                    clamped = %clamped,
                    "Loaded balance out of range, clamped"
                );
                account.balance = clamped;
            }

            let key = account.key();
            if let Some(previous) = loaded.insert(key.clone(), Slot::from_account(account)) {
                tracing::warn!(
                    key = %key,
                    replaced = %previous.username,
                    "Duplicate account key in loaded document, keeping the later entry"
                );
            }
        }

        inner.accounts = loaded;
        inner.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> AccountStore {
        AccountStore::new(Limits {
            default_balance: Money::from_units(1000),
            max_balance: Money::from_units(10_000),
        })
    }

    #[test]
    fn lookup_creates_with_default_balance() {
        let store = store();
        let account = store.get_or_create("TestPlayer");

        assert_eq!(account.username, "TestPlayer");
        assert_eq!(account.balance, Money::from_units(1000));
        assert_eq!(account.total_earned, Money::from_units(1000));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn lookup_is_case_insensitive_and_keeps_first_casing() {
        let store = store();
        store.get_or_create("TestPlayer");
        let again = store.get_or_create("TESTPLAYER");

        assert_eq!(again.username, "TestPlayer");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn credit_updates_balance_and_earned() {
        let store = store();
        let account = store.credit("Steve", Money::from_units(500)).unwrap();

        assert_eq!(account.balance, Money::from_units(1500));
        assert_eq!(account.total_earned, Money::from_units(1500));
        assert_eq!(account.total_spent, Money::ZERO);
    }

    #[test]
    fn credit_rejects_non_positive() {
        let store = store();
        assert_eq!(
            store.credit("Steve", Money::ZERO),
            Err(LedgerError::InvalidAmount {
                amount: Money::ZERO
            })
        );
        assert!(store.credit("Steve", Money::from_units(-5)).is_err());
        // Rejected before the account is looked up.
        assert!(store.is_empty());
    }

    #[test]
    fn credit_over_ceiling_leaves_balance() {
        let store = store();
        let err = store.credit("Steve", Money::from_units(9001)).unwrap_err();

        assert!(matches!(err, LedgerError::ExceedsMaxBalance { .. }));
        assert_eq!(store.balance("Steve"), Money::from_units(1000));

        // Landing exactly on the ceiling is allowed.
        let account = store.credit("Steve", Money::from_units(9000)).unwrap();
        assert_eq!(account.balance, Money::from_units(10_000));
    }

    #[test]
    fn debit_updates_balance_and_spent() {
        let store = store();
        let account = store.debit("Alex", Money::from_units(1000)).unwrap();

        assert_eq!(account.balance, Money::ZERO);
        assert_eq!(account.total_spent, Money::from_units(1000));
    }

    #[test]
    fn debit_insufficient_funds() {
        let store = store();
        let err = store.debit("Alex", Money::from_cents(100_001)).unwrap_err();

        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                balance: Money::from_units(1000),
                required: Money::from_cents(100_001),
            }
        );
        assert_eq!(store.balance("Alex"), Money::from_units(1000));
    }

    #[test]
    fn set_balance_bounds() {
        let store = store();

        assert!(store.set_balance("Alex", Money::ZERO).is_ok());
        assert!(store.set_balance("Alex", Money::from_units(10_000)).is_ok());
        assert!(matches!(
            store.set_balance("Alex", Money::from_cents(1_000_001)),
            Err(LedgerError::OutOfRange { .. })
        ));
        assert!(matches!(
            store.set_balance("Alex", Money::from_cents(-1)),
            Err(LedgerError::OutOfRange { .. })
        ));
        assert_eq!(store.balance("Alex"), Money::from_units(10_000));
    }

    #[test]
    fn set_balance_leaves_totals() {
        let store = store();
        let account = store.set_balance("Alex", Money::from_units(5)).unwrap();
        assert_eq!(account.total_earned, Money::from_units(1000));
        assert_eq!(account.total_spent, Money::ZERO);
    }

    #[test]
    fn transfer_moves_both_sides() {
        let store = store();
        let (from, to) = store
            .transfer("Steve", "Alex", Money::from_units(250))
            .unwrap();

        assert_eq!(from.balance, Money::from_units(750));
        assert_eq!(from.total_spent, Money::from_units(250));
        assert_eq!(to.balance, Money::from_units(1250));
        assert_eq!(to.total_earned, Money::from_units(1250));
    }

    #[test]
    fn transfer_to_self_rejected() {
        let store = store();
        assert!(matches!(
            store.transfer("Steve", "sTEVE", Money::from_units(1)),
            Err(LedgerError::SameAccount { .. })
        ));
    }

    #[test]
    fn transfer_is_all_or_nothing() {
        let store = store();
        store.set_balance("Rich", Money::from_units(10_000)).unwrap();
        store.set_balance("Poor", Money::from_units(10)).unwrap();

        // Receiver would overflow the ceiling: neither side changes.
        let err = store
            .transfer("Poor", "Rich", Money::from_units(5))
            .unwrap_err();
        assert!(matches!(err, LedgerError::ExceedsMaxBalance { .. }));
        assert_eq!(store.balance("Poor"), Money::from_units(10));
        assert_eq!(store.balance("Rich"), Money::from_units(10_000));

        // Sender cannot cover it: neither side changes.
        let err = store
            .transfer("Poor", "Other", Money::from_units(11))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        assert_eq!(store.balance("Poor"), Money::from_units(10));
        assert_eq!(store.balance("Other"), Money::from_units(1000));
    }

    #[test]
    fn version_tracks_changes() {
        let store = store();
        let v0 = store.version();

        store.get_or_create("A");
        let v1 = store.version();
        assert!(v1 > v0);

        // Plain reads of an existing account do not bump it.
        store.balance("A");
        assert_eq!(store.version(), v1);

        store.credit("A", Money::from_units(1)).unwrap();
        assert!(store.version() > v1);
    }

    #[test]
    fn replace_all_rekeys_accounts() {
        let store = store();
        store.get_or_create("Stale");

        store.replace_all([Account::new("Fresh", Money::from_units(42))]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.balance("FRESH"), Money::from_units(42));
    }

    #[test]
    fn replace_all_clamps_out_of_range_balances() {
        let store = store();

        let mut negative = Account::new("Neg", Money::ZERO);
        negative.balance = Money::from_units(-500);
        let huge = Account::new("Huge", Money::from_units(5_000_000));
        store.replace_all([negative, huge]);

        assert_eq!(store.balance("Neg"), Money::ZERO);
        assert_eq!(store.balance("Huge"), Money::from_units(10_000));

        // The clamped balances behave like any other.
        assert!(store.debit("Neg", Money::from_units(1)).is_err());
        assert!(store.credit("Huge", Money::from_units(1)).is_err());
    }

    #[test]
    fn replace_all_keeps_one_account_per_key() {
        let store = store();

        store.replace_all([
            Account::new("Steve", Money::from_units(1)),
            Account::new("STEVE", Money::from_units(2)),
        ]);

        assert_eq!(store.len(), 1);
        let account = store.get_or_create("steve");
        assert_eq!(account.username, "STEVE");
        assert_eq!(account.balance, Money::from_units(2));
    }

    #[test]
    fn totals_sum_balances() {
        let store = store();
        store.credit("TestPlayer", Money::from_units(500)).unwrap();
        store.credit("Player2", Money::from_units(2000)).unwrap();

        assert_eq!(store.totals(), (2, Money::from_units(4500)));
    }
}
