//! Player-facing commands.
//!
//! The host server hands us a command name and its arguments. Each command is
//! parsed into a closed [`Command`] value and executed against a [`Ledger`]
//! with a plain `match`, producing the response text.

use std::fmt::Write;

use simple_economy_core::Money;

use crate::error::CommandError;
use crate::state::Ledger;

/// Command names (including aliases) understood by [`Command::parse`].
pub const COMMAND_NAMES: &[&str] = &["balance", "bal", "money", "pay", "economy", "eco", "top"];

const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// What `/money` does to the target account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoneyAction {
    /// Credit the account.
    Give,
    /// Debit the account.
    Take,
    /// Overwrite the balance.
    Set,
}

/// `/economy` subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EconomyAction {
    /// Plugin version, player count and currency.
    Info,
    /// Re-read configuration and accounts from disk.
    Reload,
    /// Write accounts to disk.
    Save,
    /// Totals and average balance.
    Stats,
}

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/balance <player>`
    Balance {
        /// Whose balance to show.
        player: String,
    },
    /// `/money <give|take|set> <player> <amount>`
    Money {
        /// The mutation to apply.
        action: MoneyAction,
        /// The target account.
        player: String,
        /// The amount, or the new balance for `set`.
        amount: Money,
    },
    /// `/pay <player> <amount>`, paid by the issuing sender.
    Pay {
        /// The receiving account.
        recipient: String,
        /// Amount to move.
        amount: Money,
    },
    /// `/economy [reload|save|stats]`
    Economy(EconomyAction),
    /// `/top`
    Top,
}

fn parse_amount(arg: &str) -> Result<Money, CommandError> {
    arg.parse().map_err(|_| CommandError::InvalidAmount)
}

impl Command {
    /// Parse a full command line such as `/money give Steve 50`.
    ///
    /// The leading slash is optional.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] describing what is wrong with the line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let line = line.strip_prefix('/').unwrap_or(line);
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();
        Self::from_parts(name, &args)
    }

    /// Parse a command from its name and arguments.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] describing what is wrong with the arguments.
    pub fn from_parts(name: &str, args: &[&str]) -> Result<Self, CommandError> {
        match name.to_lowercase().as_str() {
            "balance" | "bal" => match args {
                [player, ..] => Ok(Self::Balance {
                    player: (*player).to_string(),
                }),
                [] => Err(CommandError::Usage("/balance [player]")),
            },
            "money" => {
                let [action, player, amount, ..] = args else {
                    return Err(CommandError::Usage("/money <give|take|set> <player> <amount>"));
                };
                let amount = parse_amount(amount)?;
                let action = match action.to_lowercase().as_str() {
                    "give" => MoneyAction::Give,
                    "take" => MoneyAction::Take,
                    "set" => MoneyAction::Set,
                    _ => return Err(CommandError::InvalidAction),
                };
                Ok(Self::Money {
                    action,
                    player: (*player).to_string(),
                    amount,
                })
            }
            "pay" => {
                let [recipient, amount, ..] = args else {
                    return Err(CommandError::Usage("/pay <player> <amount>"));
                };
                Ok(Self::Pay {
                    recipient: (*recipient).to_string(),
                    amount: parse_amount(amount)?,
                })
            }
            "economy" | "eco" => {
                let action = match args.first().map(|a| a.to_lowercase()) {
                    None => EconomyAction::Info,
                    Some(sub) => match sub.as_str() {
                        "reload" => EconomyAction::Reload,
                        "save" => EconomyAction::Save,
                        "stats" => EconomyAction::Stats,
                        _ => return Err(CommandError::InvalidEconomyCommand),
                    },
                };
                Ok(Self::Economy(action))
            }
            "top" => Ok(Self::Top),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    /// Run the command and return the response text.
    ///
    /// `sender` is the player who issued it and pays for `/pay`.
    pub fn execute(&self, ledger: &Ledger, sender: &str) -> String {
        match self {
            Self::Balance { player } => {
                let balance = ledger.get_balance(player);
                format!("{player}'s balance: {}", ledger.format_money(balance))
            }
            Self::Money {
                action,
                player,
                amount,
            } => {
                let formatted = ledger.format_money(*amount);
                match action {
                    MoneyAction::Give => match ledger.credit(player, *amount) {
                        Ok(_) => format!("Added {formatted} to {player}'s account"),
                        Err(_) => "Failed to add money!".to_string(),
                    },
                    MoneyAction::Take => match ledger.debit(player, *amount) {
                        Ok(_) => format!("Removed {formatted} from {player}'s account"),
                        Err(_) => "Failed to remove money!".to_string(),
                    },
                    MoneyAction::Set => match ledger.set_balance(player, *amount) {
                        Ok(_) => format!("Set {player}'s balance to {formatted}"),
                        Err(_) => "Failed to set balance!".to_string(),
                    },
                }
            }
            Self::Pay { recipient, amount } => match ledger.transfer(sender, recipient, *amount) {
                Ok(_) => format!("Paid {} to {recipient}", ledger.format_money(*amount)),
                Err(_) => "Payment failed! Check your balance.".to_string(),
            },
            Self::Economy(action) => economy(ledger, *action),
            Self::Top => top(ledger),
        }
    }
}

fn economy(ledger: &Ledger, action: EconomyAction) -> String {
    match action {
        EconomyAction::Info => format!(
            "Economy Plugin v{PLUGIN_VERSION}\nTotal players: {}\nCurrency: {}",
            ledger.account_count(),
            ledger.config().currency_name
        ),
        EconomyAction::Reload => match ledger.reload() {
            Ok(()) => "Economy configuration reloaded!".to_string(),
            Err(_) => "Failed to reload economy data!".to_string(),
        },
        EconomyAction::Save => match ledger.save() {
            Ok(()) => "Economy data saved!".to_string(),
            Err(_) => "Failed to save economy data!".to_string(),
        },
        EconomyAction::Stats => {
            let stats = ledger.stats();
            format!(
                "Economy Statistics:\nTotal Players: {}\nTotal Money in Economy: {}\nAverage Balance: {}",
                stats.total_players,
                ledger.format_money(stats.total_money),
                ledger.format_money(stats.average_balance)
            )
        }
    }
}

fn top(ledger: &Ledger) -> String {
    let accounts = ledger.top_accounts();
    if accounts.is_empty() {
        return "No players found!".to_string();
    }

    let mut out = String::from("Top Players by Balance:\n");
    for (i, account) in accounts.iter().enumerate() {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{}. {} - {}",
            i + 1,
            account.username,
            ledger.format_money(account.balance)
        );
    }
    out
}
