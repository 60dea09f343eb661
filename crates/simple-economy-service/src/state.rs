//! The ledger context.
//!
//! `Ledger` ties the account map, the ranking, the audit trail and durable
//! storage together. One instance is built at startup and shared by reference
//! with whatever dispatches commands; there is no global state.

use std::sync::Arc;

use parking_lot::RwLock;

use simple_economy_core::{Account, EconomyConfig, Money, Result, TransactionRecord};
use simple_economy_store::{AccountDocument, JsonStore, Store, StoreError, TransactionLog};

use crate::accounts::{AccountStore, Limits};
use crate::ranking::RankingIndex;

/// Aggregate figures over every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EconomyStats {
    /// Number of accounts.
    pub total_players: usize,
    /// Sum of all balances.
    pub total_money: Money,
    /// Mean balance, zero when there are no accounts.
    pub average_balance: Money,
}

/// The economy's in-memory state and its storage.
pub struct Ledger {
    accounts: AccountStore,
    ranking: RankingIndex,
    config: RwLock<EconomyConfig>,
    store: Arc<dyn Store>,
    audit: TransactionLog,
}

impl Ledger {
    /// Create an empty ledger over the given storage with a starting configuration.
    ///
    /// Nothing is loaded; see [`Ledger::open`] for the startup sequence.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, audit: TransactionLog, config: EconomyConfig) -> Self {
        Self {
            accounts: AccountStore::new(Limits::from(&config)),
            ranking: RankingIndex::new(config.top_players_limit),
            config: RwLock::new(config),
            store,
            audit,
        }
    }

    /// Build a ledger from a data directory store and load its saved state.
    ///
    /// Load failures are logged and startup continues with what could be read.
    #[must_use]
    pub fn open(store: JsonStore) -> Self {
        tracing::info!(data_dir = %store.data_dir().display(), "Enabling economy");

        let audit = store.transaction_log();
        let ledger = Self::new(Arc::new(store), audit, EconomyConfig::default());
        // Failures are already logged inside; the ledger stays usable.
        let _ = ledger.reload();

        tracing::info!(accounts = ledger.account_count(), "Economy enabled");
        ledger
    }

    /// Save all accounts before the process exits.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the snapshot could not be written.
    pub fn shutdown(&self) -> std::result::Result<(), StoreError> {
        tracing::info!("Disabling economy");
        self.save()?;
        tracing::info!("Economy disabled");
        Ok(())
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// A copy of the active configuration.
    #[must_use]
    pub fn config(&self) -> EconomyConfig {
        self.config.read().clone()
    }

    /// Format an amount with the active currency symbol.
    #[must_use]
    pub fn format_money(&self, amount: Money) -> String {
        self.config.read().format_money(amount)
    }

    fn apply_config(&self, config: EconomyConfig) {
        self.accounts.set_limits(Limits::from(&config));
        let limit = config.top_players_limit;
        *self.config.write() = config;
        self.ranking.set_limit(&self.accounts, limit);
    }

    /// Load the configuration document and make it active.
    ///
    /// A document that cannot be parsed at all is replaced by defaults.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the document exists but cannot be read; the
    /// active configuration is kept in that case.
    pub fn load_config(&self) -> std::result::Result<(), StoreError> {
        match self.store.load_config() {
            Ok(config) => {
                tracing::info!(
                    currency = %config.currency_name,
                    max_balance = %config.max_balance,
                    "Configuration loaded"
                );
                self.apply_config(config);
                Ok(())
            }
            Err(StoreError::ConfigParse(reason)) => {
                tracing::warn!(%reason, "Configuration unreadable, using defaults");
                self.apply_config(EconomyConfig::default());
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                Err(e)
            }
        }
    }

    /// Write the active configuration back to storage.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the write fails.
    pub fn save_config(&self) -> std::result::Result<(), StoreError> {
        let config = self.config();
        self.store.save_config(&config).map_err(|e| {
            tracing::error!(error = %e, "Failed to save configuration");
            e
        })
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Replace the in-memory accounts with the saved document, if there is one.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the document cannot be read or parsed; the
    /// in-memory accounts are untouched in that case.
    pub fn load_accounts(&self) -> std::result::Result<(), StoreError> {
        match self.store.load_accounts() {
            Ok(Some(document)) => {
                let count = document.len();
                self.accounts.replace_all(document.into_values());
                tracing::info!(accounts = count, "Accounts loaded");
            }
            Ok(None) => {
                tracing::debug!("No saved accounts, keeping current state");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load accounts");
                return Err(e);
            }
        }
        self.ranking.recompute(&self.accounts);
        Ok(())
    }

    /// Write every account to storage as one snapshot.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the write fails. In-memory balances are
    /// never affected.
    pub fn save(&self) -> std::result::Result<(), StoreError> {
        let document: AccountDocument = self.accounts.snapshot().accounts.into_iter().collect();
        self.store.save_accounts(&document).map_err(|e| {
            tracing::error!(error = %e, "Failed to save accounts");
            e
        })?;
        tracing::info!(accounts = document.len(), "Accounts saved");
        Ok(())
    }

    /// Reload configuration, then accounts.
    ///
    /// Both steps are attempted even if the first fails.
    ///
    /// # Errors
    ///
    /// Returns the first storage error encountered.
    pub fn reload(&self) -> std::result::Result<(), StoreError> {
        let config = self.load_config();
        let accounts = self.load_accounts();
        config.and(accounts)
    }

    // =========================================================================
    // Ledger operations
    // =========================================================================

    /// Return an account, creating it if it does not exist.
    pub fn get_or_create(&self, username: &str) -> Account {
        let account = self.accounts.get_or_create(username);
        self.ranking.refresh(&self.accounts);
        account
    }

    /// Current balance, creating the account if it does not exist.
    pub fn get_balance(&self, username: &str) -> Money {
        self.get_or_create(username).balance
    }

    /// Overwrite a balance.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::OutOfRange` if `amount` is outside `0..=max_balance`.
    pub fn set_balance(&self, username: &str, amount: Money) -> Result<Account> {
        let result = self.accounts.set_balance(username, amount);
        self.committed(result, || TransactionRecord::set(username, amount))
    }

    /// Add money to an account.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` or `LedgerError::ExceedsMaxBalance`.
    pub fn credit(&self, username: &str, amount: Money) -> Result<Account> {
        let result = self.accounts.credit(username, amount);
        self.committed(result, || TransactionRecord::credit(username, amount))
    }

    /// Remove money from an account.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` or `LedgerError::InsufficientFunds`.
    pub fn debit(&self, username: &str, amount: Money) -> Result<Account> {
        let result = self.accounts.debit(username, amount);
        self.committed(result, || TransactionRecord::debit(username, amount))
    }

    /// Move money between two accounts, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount`, `LedgerError::SameAccount`,
    /// `LedgerError::InsufficientFunds` or `LedgerError::ExceedsMaxBalance`.
    pub fn transfer(&self, from: &str, to: &str, amount: Money) -> Result<(Account, Account)> {
        let result = self.accounts.transfer(from, to, amount);
        self.committed(result, || TransactionRecord::transfer(from, to, amount))
    }

    /// Post-commit work, outside the account lock.
    ///
    /// The ranking is refreshed even for failed operations because a lookup may
    /// have created an account. The audit append never undoes a committed
    /// mutation.
    fn committed<T>(
        &self,
        result: Result<T>,
        record: impl FnOnce() -> TransactionRecord,
    ) -> Result<T> {
        self.ranking.refresh(&self.accounts);

        match &result {
            Ok(_) => {
                let record = record();
                tracing::debug!(
                    kind = ?record.kind,
                    from = ?record.from,
                    to = ?record.to,
                    amount = %record.amount,
                    "Transaction committed"
                );
                self.append_audit(&record);
            }
            Err(e) => tracing::debug!(error = %e, "Transaction rejected"),
        }
        result
    }

    fn append_audit(&self, record: &TransactionRecord) {
        let (enabled, symbol) = {
            let config = self.config.read();
            (config.enable_logging, config.currency_symbol.clone())
        };
        if !enabled {
            return;
        }
        if let Err(e) = self.audit.append(record, &symbol) {
            tracing::error!(error = %e, "Failed to append to transaction log");
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The current ranking, richest first.
    #[must_use]
    pub fn top_accounts(&self) -> Arc<[Account]> {
        self.ranking.snapshot()
    }

    /// The current ranking as `(username, balance)` pairs.
    #[must_use]
    pub fn top_n(&self) -> Vec<(String, Money)> {
        self.top_accounts()
            .iter()
            .map(|account| (account.username.clone(), account.balance))
            .collect()
    }

    /// Number of accounts.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Totals across the whole economy.
    #[must_use]
    pub fn stats(&self) -> EconomyStats {
        let (total_players, total_money) = self.accounts.totals();
        EconomyStats {
            total_players,
            total_money,
            average_balance: total_money.average_over(total_players),
        }
    }
}
