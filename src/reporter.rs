//! Human-readable reporting of balances, price changes and trades.
//!
//! The decision loop only talks to the [`Reporter`] trait; formatting lives
//! in the `format_*` functions so it can be checked without capturing stdout.

use crate::core::ledger::Ledger;
use crate::types::{Comparison, MissingSide, StopReason, TradeOutcome};

pub trait Reporter {
    fn balance(&mut self, capital_remaining: f64);
    fn comparisons(&mut self, comparisons: &[Comparison]);
    fn trade(&mut self, outcome: &TradeOutcome);
    /// Called once when the loop stops. `last_price` marks holdings to market.
    fn stopped(&mut self, reason: StopReason, ledger: &Ledger, last_price: &dyn Fn(&str) -> Option<f64>);
}

/// Prints report lines to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn balance(&mut self, capital_remaining: f64) {
        println!("{}", format_balance(capital_remaining));
    }

    fn comparisons(&mut self, comparisons: &[Comparison]) {
        println!("📊 Price Differences (Percentage Change):");
        for comparison in comparisons {
            println!("{}", format_comparison(comparison));
        }
    }

    fn trade(&mut self, outcome: &TradeOutcome) {
        println!("{}", format_trade(outcome));
    }

    fn stopped(&mut self, reason: StopReason, ledger: &Ledger, last_price: &dyn Fn(&str) -> Option<f64>) {
        println!("🛑 Bot Stopped: {}", reason);
        for line in format_summary(ledger, last_price) {
            println!("{}", line);
        }
    }
}

pub fn format_balance(capital_remaining: f64) -> String {
    format!("💰 Current Balance: ${:.2}", capital_remaining)
}

pub fn format_comparison(comparison: &Comparison) -> String {
    match comparison {
        Comparison::Priced(c) => {
            let marker = if c.percentage_change > 0.0 { "🟢" } else { "🔴" };
            format!(
                "{} {} | Previous: ${:.4} | Current: ${:.4} | Change: {:.4}%",
                marker, c.symbol, c.previous_price, c.current_price, c.percentage_change
            )
        }
        Comparison::NoData { symbol, missing } => {
            let detail = match missing {
                MissingSide::Previous => "no previous price",
                MissingSide::Current => "no current price",
            };
            format!("⚪ {} | no data ({})", symbol, detail)
        }
    }
}

pub fn format_trade(outcome: &TradeOutcome) -> String {
    match outcome {
        TradeOutcome::Bought { symbol, quantity, price } => {
            format!("[Bought] {:.4} of {} at ${:.4}", quantity, symbol, price)
        }
        TradeOutcome::Sold { symbol, quantity, price, .. } => {
            format!("[Sold] {:.4} of {} at ${:.4}", quantity, symbol, price)
        }
        TradeOutcome::InsufficientCapital { symbol, capital_remaining } => {
            format!(
                "[Insufficient Capital] Unable to buy {}. Remaining capital: ${:.2}",
                symbol, capital_remaining
            )
        }
        TradeOutcome::NothingToSell { symbol } => {
            format!("[No Assets] No {} to sell.", symbol)
        }
    }
}

pub fn format_summary(ledger: &Ledger, last_price: &dyn Fn(&str) -> Option<f64>) -> Vec<String> {
    let mut lines = vec![
        "📊 Final Portfolio Summary:".to_string(),
        format!("   💰 Capital: ${:.2}", ledger.capital_remaining()),
    ];

    for (symbol, quantity) in ledger.holdings().iter().filter(|(_, q)| **q > 0.0) {
        match last_price(symbol.as_str()) {
            Some(price) => lines.push(format!(
                "   📦 {}: {:.6} (≈ ${:.2})",
                symbol,
                quantity,
                quantity * price
            )),
            None => lines.push(format!("   📦 {}: {:.6} (no price)", symbol, quantity)),
        }
    }

    lines.push(format!("   📈 Marked Value: ${:.2}", ledger.market_value(last_price)));
    lines
}
