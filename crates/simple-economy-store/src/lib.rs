//! Storage layer for simple-economy.
//!
//! This crate persists the economy to a data directory and keeps the audit trail.
//!
//! # Layout
//!
//! The data directory holds three files:
//!
//! - `config.json`: the `EconomyConfig` document
//! - `players.json`: every account, keyed by canonical username
//! - `transactions.log`: one line per completed mutation, append-only
//!
//! Documents are replaced as a whole on every save by writing a temporary file
//! next to the target and renaming it over the old one.
//!
//! # Example
//!
//! ```no_run
//! use simple_economy_store::{JsonStore, Store};
//!
//! let store = JsonStore::open("plugins/EconomyPocketmine").unwrap();
//!
//! let config = store.load_config().unwrap();
//! let accounts = store.load_accounts().unwrap().unwrap_or_default();
//! println!("{} accounts, currency {}", accounts.len(), config.currency_name);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod audit;
pub mod error;
pub mod files;
pub mod json;

use std::collections::BTreeMap;

pub use audit::{format_line, TransactionLog};
pub use error::{Result, StoreError};
pub use json::JsonStore;

use simple_economy_core::{Account, AccountKey, EconomyConfig};

/// The accounts document: canonical username to account.
pub type AccountDocument = BTreeMap<AccountKey, Account>;

/// The storage trait for the economy's durable state.
///
/// Implementations hold whole-document snapshots; nothing is saved
/// incrementally.
pub trait Store: Send + Sync {
    // =========================================================================
    // Configuration
    // =========================================================================

    /// Load the economy configuration.
    ///
    /// When no document exists the defaults are written out and returned.
    /// Individual malformed fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// - `StoreError::Io` if the document exists but cannot be read.
    /// - `StoreError::ConfigParse` if the document is not a JSON object.
    fn load_config(&self) -> Result<EconomyConfig>;

    /// Overwrite the configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    fn save_config(&self, config: &EconomyConfig) -> Result<()>;

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Load the accounts document.
    ///
    /// Returns `None` when no document has been saved yet.
    ///
    /// # Errors
    ///
    /// - `StoreError::Io` if the document cannot be read.
    /// - `StoreError::Serialization` if it cannot be parsed.
    fn load_accounts(&self) -> Result<Option<AccountDocument>>;

    /// Overwrite the accounts document with a full snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails. The previous
    /// document is left intact in that case.
    fn save_accounts(&self, accounts: &AccountDocument) -> Result<()>;
}
