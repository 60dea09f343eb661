//! Command and console error types.
//!
//! `CommandError` covers parse failures of the command layer; its `Display`
//! output is the text shown to the player.

/// Errors produced while turning a command line into a [`crate::Command`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Not enough arguments; carries the usage line.
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// The amount argument is not a number.
    #[error("Invalid amount!")]
    InvalidAmount,

    /// `money` with an action other than give/take/set.
    #[error("Invalid action! Use: give, take, or set")]
    InvalidAction,

    /// `economy` with an unknown subcommand.
    #[error("Invalid economy command!")]
    InvalidEconomyCommand,

    /// No command by that name.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// An empty line.
    #[error("No command given")]
    Empty,
}

/// Errors that end a console session.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Reading commands or writing responses failed.
    #[error("console i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The final save failed.
    #[error(transparent)]
    Store(#[from] simple_economy_store::StoreError),
}
