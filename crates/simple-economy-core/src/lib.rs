//! Core types and utilities for simple-economy.
//!
//! This crate provides the foundational types shared by the ledger and its storage:
//!
//! - **Identifiers**: `AccountKey`
//! - **Amounts**: `Money`
//! - **Accounts**: `Account`
//! - **Configuration**: `EconomyConfig`, `ConfigIssue`
//! - **Transactions**: `TransactionRecord`, `TransactionKind`
//!
//! # Money Unit
//!
//! **1 unit of `Money` = 0.01 of the configured currency**
//!
//! - A player holding `$1500.00` has a balance of `150000` hundredths
//! - Stored as `i64` (integer hundredths) to avoid floating point drift
//! - Documents and display still use currency units with two decimals

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod config;
pub mod error;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::Account;
pub use config::{
    ConfigIssue, EconomyConfig, DEFAULT_BALANCE, DEFAULT_CURRENCY_NAME, DEFAULT_CURRENCY_SYMBOL,
    DEFAULT_MAX_BALANCE, DEFAULT_TOP_PLAYERS_LIMIT,
};
pub use error::{LedgerError, Result};
pub use ids::AccountKey;
pub use money::{Money, MoneyParseError};
pub use transaction::{TransactionKind, TransactionRecord};
