//! Simple-economy ledger service.
//!
//! This crate holds the concurrent ledger and the command layer on top of it:
//!
//! - `AccountStore`: the account map and its atomic balance operations
//! - `RankingIndex`: the top-N view by balance
//! - `Ledger`: the context tying accounts, ranking, audit trail and storage together
//! - `Command`: the closed set of player commands and their responses
//!
//! # Example
//!
//! ```no_run
//! use simple_economy_core::Money;
//! use simple_economy_service::Ledger;
//! use simple_economy_store::JsonStore;
//!
//! let ledger = Ledger::open(JsonStore::open("plugins/EconomyPocketmine").unwrap());
//!
//! ledger.credit("TestPlayer", Money::from_units(500)).unwrap();
//! assert_eq!(ledger.format_money(ledger.get_balance("TestPlayer")), "$1500.00");
//!
//! ledger.shutdown().unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod accounts;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod ranking;
pub mod state;

pub use accounts::{AccountStore, Limits, Snapshot};
pub use commands::{Command, EconomyAction, MoneyAction, COMMAND_NAMES};
pub use config::ServiceConfig;
pub use error::{CommandError, ConsoleError};
pub use ranking::RankingIndex;
pub use state::{EconomyStats, Ledger};
