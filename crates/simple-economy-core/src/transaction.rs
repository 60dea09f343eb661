//! Transaction records for simple-economy.
//!
//! Every successful balance mutation produces one immutable record for the
//! audit trail. Records are built after the mutation commits and never change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Money;

/// The kind of mutation a record describes.
///
/// The numeric codes are part of the audit log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money added to an account.
    Credit,

    /// Money removed from an account.
    Debit,

    /// Balance overwritten by an administrator.
    Set,

    /// Money moved between two accounts.
    Transfer,
}

impl TransactionKind {
    /// Numeric code written to the audit log.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Credit => 0,
            Self::Debit => 1,
            Self::Set => 2,
            Self::Transfer => 3,
        }
    }

    /// Reason text the ledger attaches to records of this kind.
    #[must_use]
    pub const fn default_reason(self) -> &'static str {
        match self {
            Self::Credit => "Money added",
            Self::Debit => "Money subtracted",
            Self::Set => "Balance set by admin",
            Self::Transfer => "Money transfer",
        }
    }
}

/// A completed mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Paying side, if any.
    pub from: Option<String>,

    /// Receiving side, if any.
    pub to: Option<String>,

    /// Amount moved, or the new balance for `Set`.
    pub amount: Money,

    /// What happened.
    pub kind: TransactionKind,

    /// When the mutation committed.
    pub timestamp: DateTime<Utc>,

    /// Free-text explanation.
    pub reason: String,
}

impl TransactionRecord {
    fn new(
        from: Option<&str>,
        to: Option<&str>,
        amount: Money,
        kind: TransactionKind,
    ) -> Self {
        Self {
            from: from.map(str::to_string),
            to: to.map(str::to_string),
            amount,
            kind,
            timestamp: Utc::now(),
            reason: kind.default_reason().to_string(),
        }
    }

    /// Record money added to `to`.
    #[must_use]
    pub fn credit(to: &str, amount: Money) -> Self {
        Self::new(None, Some(to), amount, TransactionKind::Credit)
    }

    /// Record money removed from `from`.
    #[must_use]
    pub fn debit(from: &str, amount: Money) -> Self {
        Self::new(Some(from), None, amount, TransactionKind::Debit)
    }

    /// Record the balance of `to` being set to `amount`.
    #[must_use]
    pub fn set(to: &str, amount: Money) -> Self {
        Self::new(None, Some(to), amount, TransactionKind::Set)
    }

    /// Record money moved from `from` to `to`.
    #[must_use]
    pub fn transfer(from: &str, to: &str, amount: Money) -> Self {
        Self::new(Some(from), Some(to), amount, TransactionKind::Transfer)
    }

    /// Pin the timestamp, for replaying recorded history.
    #[must_use]
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
