//! Identifier types for simple-economy.
//!
//! Players are identified by their username. Lookups are case-insensitive, so
//! every map keyed by player uses the canonical (lowercased) form wrapped in
//! `AccountKey`, while the original casing is kept on the `Account` for display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical, case-insensitive identity of an account.
///
/// Two usernames that differ only in case produce equal keys.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AccountKey(String);

impl AccountKey {
    /// Canonicalize a username into an account key.
    #[must_use]
    pub fn new(username: &str) -> Self {
        Self(username.to_lowercase())
    }

    /// Return the canonical form as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether two usernames refer to the same account.
    #[must_use]
    pub fn same_account(a: &str, b: &str) -> bool {
        Self::new(a) == Self::new(b)
    }
}

impl fmt::Debug for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountKey({})", self.0)
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Keys read back from documents are re-canonicalized so hand-edited files still resolve.
impl From<String> for AccountKey {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for AccountKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<AccountKey> for String {
    fn from(key: AccountKey) -> Self {
        key.0
    }
}

impl AsRef<str> for AccountKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
