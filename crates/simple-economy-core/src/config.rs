//! Economy configuration.
//!
//! The configuration is loaded once at startup and replaced only by an explicit
//! reload. Parsing is deliberately lenient: every field is read on its own and a
//! bad field falls back to its default instead of rejecting the whole document.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Money;

// ============================================================================
// Defaults
// ============================================================================

/// Balance given to a newly created account ($1000.00).
pub const DEFAULT_BALANCE: Money = Money::from_units(1000);

/// Balance ceiling ($1,000,000.00).
pub const DEFAULT_MAX_BALANCE: Money = Money::from_units(1_000_000);

/// Currency symbol prefixed to formatted amounts.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Human-readable currency name.
pub const DEFAULT_CURRENCY_NAME: &str = "Coins";

/// Number of accounts kept in the ranking.
pub const DEFAULT_TOP_PLAYERS_LIMIT: usize = 10;

/// Process-wide economy settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyConfig {
    /// Starting balance for new accounts.
    pub default_balance: Money,

    /// Upper bound for any balance.
    pub max_balance: Money,

    /// Symbol used when formatting amounts.
    pub currency_symbol: String,

    /// Display name of the currency.
    pub currency_name: String,

    /// Whether completed mutations are appended to the transaction log.
    pub enable_logging: bool,

    /// How many accounts the ranking holds.
    pub top_players_limit: usize,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            default_balance: DEFAULT_BALANCE,
            max_balance: DEFAULT_MAX_BALANCE,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            currency_name: DEFAULT_CURRENCY_NAME.to_string(),
            enable_logging: true,
            top_players_limit: DEFAULT_TOP_PLAYERS_LIMIT,
        }
    }
}

impl EconomyConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the currency symbol.
    #[must_use]
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Enable or disable the transaction log.
    #[must_use]
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Set the ranking size.
    #[must_use]
    pub fn with_top_players_limit(mut self, limit: usize) -> Self {
        self.top_players_limit = limit;
        self
    }

    /// Format an amount with the configured symbol, e.g. `$1500.00`.
    #[must_use]
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }

    /// Build a configuration from a parsed document.
    ///
    /// Fields that are missing, mistyped or out of range keep their default and
    /// are reported back as issues. Unknown keys are ignored.
    #[must_use]
    pub fn from_document(doc: &Map<String, Value>) -> (Self, Vec<ConfigIssue>) {
        let mut config = Self::default();
        let mut issues = Vec::new();

        if let Some(amount) = read_field::<Money>(doc, "default_balance", &mut issues) {
            if amount.is_negative() {
                issues.push(ConfigIssue::new("default_balance", "must not be negative"));
            } else {
                config.default_balance = amount;
            }
        }
        if let Some(amount) = read_field::<Money>(doc, "max_balance", &mut issues) {
            if amount.is_negative() {
                issues.push(ConfigIssue::new("max_balance", "must not be negative"));
            } else {
                config.max_balance = amount;
            }
        }
        if let Some(symbol) = read_field(doc, "currency_symbol", &mut issues) {
            config.currency_symbol = symbol;
        }
        if let Some(name) = read_field(doc, "currency_name", &mut issues) {
            config.currency_name = name;
        }
        if let Some(enabled) = read_field(doc, "enable_logging", &mut issues) {
            config.enable_logging = enabled;
        }
        if let Some(limit) = read_field(doc, "top_players_limit", &mut issues) {
            config.top_players_limit = limit;
        }

        if config.default_balance > config.max_balance {
            issues.push(ConfigIssue::new(
                "default_balance",
                format!(
                    "{} exceeds max_balance {}, clamped",
                    config.default_balance, config.max_balance
                ),
            ));
            config.default_balance = config.max_balance;
        }

        (config, issues)
    }
}

fn read_field<T: DeserializeOwned>(
    doc: &Map<String, Value>,
    field: &'static str,
    issues: &mut Vec<ConfigIssue>,
) -> Option<T> {
    let Some(value) = doc.get(field) else {
        issues.push(ConfigIssue::new(field, "missing"));
        return None;
    };
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            issues.push(ConfigIssue::new(field, e.to_string()));
            None
        }
    }
}

/// A configuration field that was replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// The offending key.
    pub field: &'static str,
    /// Why the value was rejected.
    pub reason: String,
}

impl ConfigIssue {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: &Value) -> (EconomyConfig, Vec<ConfigIssue>) {
        EconomyConfig::from_document(value.as_object().unwrap())
    }

    #[test]
    fn test_default_config() {
        let config = EconomyConfig::default();
        assert_eq!(config.default_balance, Money::from_units(1000));
        assert_eq!(config.max_balance, Money::from_units(1_000_000));
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.currency_name, "Coins");
        assert!(config.enable_logging);
        assert_eq!(config.top_players_limit, 10);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EconomyConfig::new()
            .with_currency_symbol("€")
            .with_top_players_limit(3)
            .with_logging(false);

        assert_eq!(config.format_money(Money::from_cents(250)), "€2.50");
        assert_eq!(config.top_players_limit, 3);
        assert!(!config.enable_logging);
    }

    #[test]
    fn full_document_parses_cleanly() {
        let doc = serde_json::to_value(EconomyConfig::default()).unwrap();
        let (config, issues) = parse(&doc);
        assert_eq!(config, EconomyConfig::default());
        assert!(issues.is_empty());
    }

    #[test]
    fn malformed_fields_fall_back() {
        let (config, issues) = parse(&json!({
            "default_balance": "lots",
            "max_balance": 5000.0,
            "currency_symbol": "£",
            "currency_name": 7,
            "enable_logging": false,
            "top_players_limit": -1,
            "unknown": true
        }));

        assert_eq!(config.default_balance, DEFAULT_BALANCE);
        assert_eq!(config.max_balance, Money::from_units(5000));
        assert_eq!(config.currency_symbol, "£");
        assert_eq!(config.currency_name, DEFAULT_CURRENCY_NAME);
        assert!(!config.enable_logging);
        assert_eq!(config.top_players_limit, DEFAULT_TOP_PLAYERS_LIMIT);

        let fields: Vec<_> = issues.iter().map(|i| i.field).collect();
        assert_eq!(fields, ["default_balance", "currency_name", "top_players_limit"]);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let (config, issues) = parse(&json!({ "max_balance": -10.0 }));
        assert_eq!(config.max_balance, DEFAULT_MAX_BALANCE);
        assert!(issues.iter().any(|i| i.field == "max_balance"));
    }

    #[test]
    fn default_balance_clamped_to_max() {
        let (config, issues) = parse(&json!({
            "default_balance": 500.0,
            "max_balance": 100.0
        }));
        assert_eq!(config.default_balance, Money::from_units(100));
        assert!(issues
            .iter()
            .any(|i| i.field == "default_balance" && i.reason.contains("clamped")));
    }
}
