//! Append-only transaction log.
//!
//! Each completed mutation becomes one text line:
//!
//! ```text
//! [2024-01-01 12:00:00] -> TestPlayer: $500.00 (Type: 0, Reason: Money added)
//! [2024-01-01 12:00:05] Steve -> Alex: $20.00 (Type: 3, Reason: Money transfer)
//! ```
//!
//! The file is never rotated or truncated.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use simple_economy_core::TransactionRecord;

use crate::error::{Result, StoreError};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a record as a single log line (without the trailing newline).
///
/// Timestamps are written in UTC.
#[must_use]
pub fn format_line(record: &TransactionRecord, currency_symbol: &str) -> String {
    let from = record
        .from
        .as_deref()
        .map(|name| format!("{name} "))
        .unwrap_or_default();
    format!(
        "[{}] {from}-> {}: {} (Type: {}, Reason: {})",
        record.timestamp.format(TIMESTAMP_FORMAT),
        record.to.as_deref().unwrap_or_default(),
        record.amount.format_with(currency_symbol),
        record.kind.code(),
        record.reason,
    )
}

/// The audit trail file.
#[derive(Debug)]
pub struct TransactionLog {
    path: PathBuf,
    /// Serializes appends so concurrent writers never interleave within a line.
    write_lock: Mutex<()>,
}

impl TransactionLog {
    /// Create a log that appends to `path`. The file is created on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The file being appended to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be opened or written.
    pub fn append(&self, record: &TransactionRecord, currency_symbol: &str) -> Result<()> {
        let mut line = format_line(record, currency_symbol);
        line.push('\n');

        let _guard = self.write_lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| StoreError::io(&self.path, e))
    }
}
