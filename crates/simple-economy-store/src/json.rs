//! JSON file storage implementation.
//!
//! This module provides the `JsonStore` implementation of the `Store` trait.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use simple_economy_core::EconomyConfig;

use crate::audit::TransactionLog;
use crate::error::{Result, StoreError};
use crate::files;
use crate::{AccountDocument, Store};

/// JSON-document storage rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    /// Open a store at the given directory, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).map_err(|e| StoreError::io(&data_dir, e))?;
        Ok(Self { data_dir })
    }

    /// The directory this store writes to.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The audit trail kept alongside the documents.
    #[must_use]
    pub fn transaction_log(&self) -> TransactionLog {
        TransactionLog::new(files::transaction_log_path(&self.data_dir))
    }

    /// Read a file, mapping "not found" to `None`.
    fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    /// Serialize a document as pretty JSON and move it into place atomically.
    fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let tmp_path = files::temp_path(path);
        let write_tmp = || -> io::Result<()> {
            let mut file = File::create(&tmp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()
        };
        if let Err(e) = write_tmp() {
            // Best effort; the target document is untouched either way.
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::io(&tmp_path, e));
        }

        fs::rename(&tmp_path, path).map_err(|e| StoreError::io(path, e))
    }
}

impl Store for JsonStore {
    // =========================================================================
    // Configuration
    // =========================================================================

    fn load_config(&self) -> Result<EconomyConfig> {
        let path = files::config_path(&self.data_dir);

        let Some(bytes) = Self::read_optional(&path)? else {
            let config = EconomyConfig::default();
            tracing::info!(path = %path.display(), "No configuration found, writing defaults");
            if let Err(e) = self.save_config(&config) {
                tracing::error!(error = %e, "Failed to write default configuration");
            }
            return Ok(config);
        };

        let doc: Value =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::ConfigParse(e.to_string()))?;
        let Value::Object(map) = doc else {
            return Err(StoreError::ConfigParse(
                "expected a JSON object at the top level".into(),
            ));
        };

        let (config, issues) = EconomyConfig::from_document(&map);
        for issue in &issues {
            tracing::warn!(
                field = issue.field,
                reason = %issue.reason,
                "Configuration field replaced by default"
            );
        }
        tracing::debug!(path = %path.display(), issues = issues.len(), "Configuration loaded");

        Ok(config)
    }

    fn save_config(&self, config: &EconomyConfig) -> Result<()> {
        Self::write_document(&files::config_path(&self.data_dir), config)
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    fn load_accounts(&self) -> Result<Option<AccountDocument>> {
        let path = files::accounts_path(&self.data_dir);

        let Some(bytes) = Self::read_optional(&path)? else {
            return Ok(None);
        };

        let accounts: AccountDocument = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        tracing::debug!(path = %path.display(), accounts = accounts.len(), "Accounts loaded");
        Ok(Some(accounts))
    }

    fn save_accounts(&self, accounts: &AccountDocument) -> Result<()> {
        let path = files::accounts_path(&self.data_dir);
        Self::write_document(&path, accounts)?;

        tracing::debug!(path = %path.display(), accounts = accounts.len(), "Accounts saved");
        Ok(())
    }
}
