//! File names inside the data directory.

use std::path::{Path, PathBuf};

/// Configuration document.
pub const CONFIG_FILE: &str = "config.json";

/// Accounts document.
pub const ACCOUNTS_FILE: &str = "players.json";

/// Audit trail.
pub const TRANSACTION_LOG_FILE: &str = "transactions.log";

/// Path of the configuration document.
#[must_use]
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Path of the accounts document.
#[must_use]
pub fn accounts_path(data_dir: &Path) -> PathBuf {
    data_dir.join(ACCOUNTS_FILE)
}

/// Path of the audit trail.
#[must_use]
pub fn transaction_log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(TRANSACTION_LOG_FILE)
}

/// Scratch file a document is written to before being renamed into place.
///
/// Lives in the same directory as the target so the rename never crosses
/// filesystems.
#[must_use]
pub fn temp_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}
