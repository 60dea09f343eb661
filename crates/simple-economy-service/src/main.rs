//! Simple-economy console.
//!
//! Loads the economy from the data directory, then reads one command per line
//! from stdin and prints the response. The accounts are saved when the session
//! ends.

use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use simple_economy_service::{console, Ledger, ServiceConfig, COMMAND_NAMES};
use simple_economy_store::JsonStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,simple_economy=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = ServiceConfig::from_env();
    tracing::info!(
        data_dir = %config.data_dir.display(),
        console_sender = %config.console_sender,
        "Service configuration loaded"
    );

    let store = JsonStore::open(&config.data_dir)?;
    let ledger = Ledger::open(store);
    tracing::info!(commands = ?COMMAND_NAMES, "Commands registered");

    console::serve(
        &ledger,
        &config.console_sender,
        io::stdin().lock(),
        io::stdout().lock(),
    )?;
    Ok(())
}
