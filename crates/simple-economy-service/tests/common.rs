//! Common test utilities for simple-economy integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use simple_economy_core::{EconomyConfig, Money};
use simple_economy_service::Ledger;
use simple_economy_store::{files, JsonStore};

/// Test harness holding a ledger backed by a fresh data directory.
pub struct TestHarness {
    /// The ledger under test.
    pub ledger: Ledger,
    /// Temporary data directory (kept alive for test duration).
    pub temp_dir: TempDir,
}

impl TestHarness {
    /// Open a ledger the way the binary does, over an empty data directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = JsonStore::open(temp_dir.path()).expect("Failed to open store");
        let ledger = Ledger::open(store);

        Self { ledger, temp_dir }
    }

    /// Build a ledger with an explicit configuration, skipping the disk load.
    pub fn with_config(config: EconomyConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = JsonStore::open(temp_dir.path()).expect("Failed to open store");
        let audit = store.transaction_log();
        let ledger = Ledger::new(Arc::new(store), audit, config);

        Self { ledger, temp_dir }
    }

    /// Open a second ledger over the same data directory.
    pub fn reopen(&self) -> Ledger {
        let store = JsonStore::open(self.temp_dir.path()).expect("Failed to reopen store");
        Ledger::open(store)
    }

    /// The data directory.
    pub fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of `players.json`.
    pub fn accounts_path(&self) -> PathBuf {
        files::accounts_path(self.data_dir())
    }

    /// Path of `config.json`.
    pub fn config_path(&self) -> PathBuf {
        files::config_path(self.data_dir())
    }

    /// Contents of the transaction log, empty if it was never created.
    pub fn transaction_log(&self) -> String {
        std::fs::read_to_string(files::transaction_log_path(self.data_dir())).unwrap_or_default()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for whole currency units.
pub fn units(n: i64) -> Money {
    Money::from_units(n)
}
