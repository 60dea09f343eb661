//! Line-oriented command console.
//!
//! Reads one command per line, writes one response per command, and saves the
//! ledger when the session ends for any reason.

use std::io::{BufRead, Write};

use crate::commands::Command;
use crate::error::ConsoleError;
use crate::state::Ledger;

/// Run commands from `input` until end of input, then shut the ledger down.
///
/// Lines that are not valid UTF-8 are skipped. A read or write failure ends the
/// session early, but the ledger is still saved before the error is returned.
///
/// # Errors
///
/// Returns the console I/O error if one ended the session, otherwise the
/// storage error from the final save.
pub fn serve<R: BufRead, W: Write>(
    ledger: &Ledger,
    sender: &str,
    input: R,
    output: W,
) -> Result<(), ConsoleError> {
    let session = run(ledger, sender, input, output);
    if let Err(e) = &session {
        tracing::error!(error = %e, "Console I/O failed, shutting down");
    }

    let shutdown = ledger.shutdown();
    session?;
    shutdown?;
    Ok(())
}

fn run<R: BufRead, W: Write>(
    ledger: &Ledger,
    sender: &str,
    input: R,
    mut output: W,
) -> std::io::Result<()> {
    for line in input.split(b'\n') {
        let bytes = line?;
        let Ok(line) = std::str::from_utf8(&bytes) else {
            tracing::warn!(bytes = bytes.len(), "Skipping input line that is not valid UTF-8");
            continue;
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match Command::parse(line) {
            Ok(command) => command.execute(ledger, sender),
            Err(e) => e.to_string(),
        };

        writeln!(output, "{}", response.trim_end())?;
        output.flush()?;
    }
    Ok(())
}
