//! Error types for simple-economy.

use crate::Money;

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Invariant violations reported by ledger operations.
///
/// Every variant leaves the affected balances exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// A positive amount was required.
    #[error("invalid amount: {amount} (must be greater than zero)")]
    InvalidAmount {
        /// The rejected amount.
        amount: Money,
    },

    /// A balance target outside `0..=max_balance`.
    #[error("balance {amount} out of range (0.00..={max_balance})")]
    OutOfRange {
        /// The rejected target balance.
        amount: Money,
        /// The configured ceiling.
        max_balance: Money,
    },

    /// A credit would push the balance over the ceiling.
    #[error("balance {balance} + {amount} would exceed max balance {max_balance}")]
    ExceedsMaxBalance {
        /// Current balance of the receiving account.
        balance: Money,
        /// Amount being credited.
        amount: Money,
        /// The configured ceiling.
        max_balance: Money,
    },

    /// A debit larger than the available balance.
    #[error("insufficient funds: balance={balance}, required={required}")]
    InsufficientFunds {
        /// Current balance of the paying account.
        balance: Money,
        /// Amount being debited.
        required: Money,
    },

    /// A transfer whose source and destination are the same account.
    #[error("cannot transfer from an account to itself: {username}")]
    SameAccount {
        /// The username given for both sides.
        username: String,
    },
}
