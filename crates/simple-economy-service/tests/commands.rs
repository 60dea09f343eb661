//! Command execution integration tests.

mod common;

use common::{units, TestHarness};
use simple_economy_core::Money;
use simple_economy_service::Command;

fn run(harness: &TestHarness, sender: &str, line: &str) -> String {
    match Command::parse(line) {
        Ok(command) => command.execute(&harness.ledger, sender),
        Err(e) => e.to_string(),
    }
}

// ============================================================================
// Balance and money
// ============================================================================

#[test]
fn balance_shows_formatted_amount() {
    let harness = TestHarness::new();

    assert_eq!(
        run(&harness, "Console", "/balance TestPlayer"),
        "TestPlayer's balance: $1000.00"
    );
}

#[test]
fn money_subcommands() {
    let harness = TestHarness::new();

    assert_eq!(
        run(&harness, "Console", "/money give TestPlayer 500"),
        "Added $500.00 to TestPlayer's account"
    );
    assert_eq!(
        run(&harness, "Console", "/money take TestPlayer 25.5"),
        "Removed $25.50 from TestPlayer's account"
    );
    assert_eq!(
        run(&harness, "Console", "/money set Other 42"),
        "Set Other's balance to $42.00"
    );

    assert_eq!(harness.ledger.get_balance("TestPlayer"), Money::from_cents(147_450));
    assert_eq!(harness.ledger.get_balance("Other"), units(42));
}

#[test]
fn money_failures() {
    let harness = TestHarness::new();

    assert_eq!(
        run(&harness, "Console", "/money take TestPlayer 5000"),
        "Failed to remove money!"
    );
    assert_eq!(
        run(&harness, "Console", "/money give TestPlayer 0"),
        "Failed to add money!"
    );
    assert_eq!(
        run(&harness, "Console", "/money set TestPlayer -1"),
        "Failed to set balance!"
    );
    assert_eq!(
        run(&harness, "Console", "/money give TestPlayer lots"),
        "Invalid amount!"
    );
    assert_eq!(
        run(&harness, "Console", "/money steal TestPlayer 5"),
        "Invalid action! Use: give, take, or set"
    );
    assert_eq!(harness.ledger.get_balance("TestPlayer"), units(1000));
}

// ============================================================================
// Pay
// ============================================================================

#[test]
fn pay_is_charged_to_sender() {
    let harness = TestHarness::new();

    assert_eq!(run(&harness, "Alex", "/pay Steve 250"), "Paid $250.00 to Steve");
    assert_eq!(harness.ledger.get_balance("Alex"), units(750));
    assert_eq!(harness.ledger.get_balance("Steve"), units(1250));

    assert_eq!(
        run(&harness, "Alex", "/pay Steve 10000"),
        "Payment failed! Check your balance."
    );
    assert_eq!(
        run(&harness, "Alex", "/pay alex 1"),
        "Payment failed! Check your balance."
    );
    assert_eq!(run(&harness, "Alex", "/pay Steve"), "Usage: /pay <player> <amount>");
}

// ============================================================================
// Economy and top
// ============================================================================

#[test]
fn economy_info_and_stats() {
    let harness = TestHarness::new();

    run(&harness, "Console", "/money give TestPlayer 500");
    run(&harness, "Console", "/money give Player2 2000");

    let info = run(&harness, "Console", "/economy");
    assert!(info.starts_with("Economy Plugin v"));
    assert!(info.contains("Total players: 2"));
    assert!(info.ends_with("Currency: Coins"));

    assert_eq!(
        run(&harness, "Console", "/eco stats"),
        "Economy Statistics:\nTotal Players: 2\nTotal Money in Economy: $4500.00\nAverage Balance: $2250.00"
    );
}

#[test]
fn economy_save_and_reload() {
    let harness = TestHarness::new();

    run(&harness, "Console", "/money give TestPlayer 500");
    assert_eq!(run(&harness, "Console", "/economy save"), "Economy data saved!");
    assert!(harness.accounts_path().exists());

    run(&harness, "Console", "/money give TestPlayer 500");
    assert_eq!(
        run(&harness, "Console", "/economy reload"),
        "Economy configuration reloaded!"
    );
    assert_eq!(harness.ledger.get_balance("TestPlayer"), units(1500));

    std::fs::write(harness.accounts_path(), "[oops").unwrap();
    assert_eq!(
        run(&harness, "Console", "/economy reload"),
        "Failed to reload economy data!"
    );
    assert_eq!(
        run(&harness, "Console", "/economy fly"),
        "Invalid economy command!"
    );
}

#[test]
fn top_lists_richest_first() {
    let harness = TestHarness::new();

    assert_eq!(run(&harness, "Console", "/top"), "No players found!");

    run(&harness, "Console", "/money give TestPlayer 500");
    run(&harness, "Console", "/money give Player2 2000");

    assert_eq!(
        run(&harness, "Console", "/top"),
        "Top Players by Balance:\n1. Player2 - $3000.00\n2. TestPlayer - $1500.00\n"
    );
}
