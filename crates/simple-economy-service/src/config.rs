//! Process configuration.
//!
//! Economy settings (currency, limits) live in the data directory and are
//! handled by the store; this only covers where that directory is and how the
//! console identifies itself.

use std::path::PathBuf;

/// Default data directory, relative to the server's working directory.
pub const DEFAULT_DATA_DIR: &str = "plugins/EconomyPocketmine";

/// Default name the console uses when it issues `/pay`.
pub const DEFAULT_CONSOLE_SENDER: &str = "Console";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Directory holding `config.json`, `players.json` and the transaction log
    /// (default: `plugins/EconomyPocketmine`).
    pub data_dir: PathBuf,

    /// Sender name for commands typed on the console (default: `Console`).
    pub console_sender: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR")
                .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from),
            console_sender: std::env::var("CONSOLE_SENDER")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CONSOLE_SENDER.into()),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            console_sender: DEFAULT_CONSOLE_SENDER.into(),
        }
    }
}
