// Paper-trading capital ledger

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::GridConfig;
use crate::types::TradeOutcome;

/// Fixed-size grid allocation: every buy spends the same slice of the
/// starting capital, regardless of the current balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridAllocation {
    pub starting_capital: f64,
    pub partitions: usize,
}

impl GridAllocation {
    pub fn new(starting_capital: f64, partitions: usize) -> Self {
        Self {
            starting_capital,
            partitions,
        }
    }

    pub fn per_trade_allocation(&self) -> f64 {
        self.starting_capital / self.partitions as f64
    }
}

impl From<&GridConfig> for GridAllocation {
    fn from(config: &GridConfig) -> Self {
        Self::new(config.starting_capital, config.partitions)
    }
}

#[derive(Debug, Clone)]
pub struct Ledger {
    capital_remaining: f64,
    holdings: BTreeMap<String, f64>,
    allocation: GridAllocation,
}

impl Ledger {
    pub fn new(allocation: GridAllocation) -> Self {
        Self {
            capital_remaining: allocation.starting_capital,
            holdings: BTreeMap::new(),
            allocation,
        }
    }

    /// Start from an arbitrary balance, e.g. to resume a partially spent pool.
    pub fn with_capital(allocation: GridAllocation, capital_remaining: f64) -> Self {
        Self {
            capital_remaining,
            holdings: BTreeMap::new(),
            allocation,
        }
    }

    /// Spend one grid allocation on `symbol` at `price`.
    pub fn buy(&mut self, symbol: &str, price: f64) -> TradeOutcome {
        let allocation = self.allocation.per_trade_allocation();

        if self.capital_remaining < allocation {
            debug!(
                symbol,
                capital_remaining = self.capital_remaining,
                allocation,
                "buy skipped: insufficient capital"
            );
            return TradeOutcome::InsufficientCapital {
                symbol: symbol.to_string(),
                capital_remaining: self.capital_remaining,
            };
        }

        let quantity = allocation / price;
        self.capital_remaining -= allocation;
        *self.holdings.entry(symbol.to_string()).or_insert(0.0) += quantity;

        debug!(symbol, quantity, price, capital_remaining = self.capital_remaining, "bought");
        TradeOutcome::Bought {
            symbol: symbol.to_string(),
            quantity,
            price,
        }
    }

    /// Liquidate the whole holding of `symbol` at `price`.
    pub fn sell(&mut self, symbol: &str, price: f64) -> TradeOutcome {
        let quantity = self.holding(symbol);

        if quantity <= 0.0 {
            debug!(symbol, "sell skipped: nothing held");
            return TradeOutcome::NothingToSell {
                symbol: symbol.to_string(),
            };
        }

        let proceeds = quantity * price;
        self.capital_remaining += proceeds;
        self.holdings.insert(symbol.to_string(), 0.0);

        debug!(symbol, quantity, price, proceeds, capital_remaining = self.capital_remaining, "sold");
        TradeOutcome::Sold {
            symbol: symbol.to_string(),
            quantity,
            price,
            proceeds,
        }
    }

    pub fn capital_remaining(&self) -> f64 {
        self.capital_remaining
    }

    pub fn holding(&self, symbol: &str) -> f64 {
        self.holdings.get(symbol).copied().unwrap_or(0.0)
    }

    pub fn holdings(&self) -> &BTreeMap<String, f64> {
        &self.holdings
    }

    pub fn allocation(&self) -> GridAllocation {
        self.allocation
    }

    pub fn per_trade_allocation(&self) -> f64 {
        self.allocation.per_trade_allocation()
    }

    pub fn is_exhausted(&self) -> bool {
        self.capital_remaining <= 0.0
    }

    /// Capital plus open holdings marked at `price_of`. Holdings with no
    /// known price are left out.
    pub fn market_value<F>(&self, price_of: F) -> f64
    where
        F: Fn(&str) -> Option<f64>,
    {
        self.holdings
            .iter()
            .filter(|(_, quantity)| **quantity > 0.0)
            .filter_map(|(symbol, &quantity)| price_of(symbol.as_str()).map(|price| quantity * price))
            .sum::<f64>()
            + self.capital_remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn default_ledger() -> Ledger {
        Ledger::new(GridAllocation::new(100.0, 10))
    }

    #[test]
    fn test_buy_spends_one_allocation() {
        let mut ledger = default_ledger();
        assert_eq!(ledger.per_trade_allocation(), 10.0);

        let outcome = ledger.buy("BTCUSDT", 50000.0);
        assert!(matches!(outcome, TradeOutcome::Bought { quantity, .. } if (quantity - 0.0002).abs() < 1e-12));
        assert_eq!(ledger.capital_remaining(), 90.0);
        assert!((ledger.holding("BTCUSDT") - 0.0002).abs() < 1e-12);
    }

    #[test]
    fn test_buys_accumulate_holdings() {
        let mut ledger = default_ledger();
        ledger.buy("ETHUSDT", 100.0);
        ledger.buy("ETHUSDT", 50.0);
        assert!((ledger.holding("ETHUSDT") - 0.3).abs() < EPSILON);
        assert_eq!(ledger.capital_remaining(), 80.0);
    }

    #[test]
    fn test_buy_never_goes_negative() {
        let mut ledger = default_ledger();
        for _ in 0..25 {
            ledger.buy("BTCUSDT", 123.45);
            assert!(ledger.capital_remaining() >= 0.0);
        }
        assert_eq!(ledger.capital_remaining(), 0.0);
        assert!(ledger.is_exhausted());

        let outcome = ledger.buy("BTCUSDT", 123.45);
        assert_eq!(
            outcome,
            TradeOutcome::InsufficientCapital { symbol: "BTCUSDT".to_string(), capital_remaining: 0.0 }
        );
    }

    #[test]
    fn test_insufficient_capital_leaves_state_untouched() {
        let mut ledger = Ledger::with_capital(GridAllocation::new(100.0, 10), 9.99);
        let outcome = ledger.buy("BTCUSDT", 1.0);
        assert!(!outcome.is_executed());
        assert_eq!(ledger.capital_remaining(), 9.99);
        assert_eq!(ledger.holding("BTCUSDT"), 0.0);
    }

    #[test]
    fn test_sell_without_holdings_is_a_no_op() {
        let mut ledger = default_ledger();
        let outcome = ledger.sell("BTCUSDT", 50000.0);
        assert_eq!(outcome, TradeOutcome::NothingToSell { symbol: "BTCUSDT".to_string() });
        assert_eq!(ledger.capital_remaining(), 100.0);
        assert!(ledger.holdings().is_empty());
    }

    #[test]
    fn test_sell_liquidates_fully() {
        let mut ledger = default_ledger();
        ledger.buy("SOLUSDT", 20.0);
        ledger.buy("SOLUSDT", 20.0);

        let outcome = ledger.sell("SOLUSDT", 25.0);
        match outcome {
            TradeOutcome::Sold { quantity, proceeds, .. } => {
                assert!((quantity - 1.0).abs() < EPSILON);
                assert!((proceeds - 25.0).abs() < EPSILON);
            }
            other => panic!("expected sale, got {:?}", other),
        }
        assert_eq!(ledger.holding("SOLUSDT"), 0.0);
        assert!((ledger.capital_remaining() - 105.0).abs() < EPSILON);
    }

    #[test]
    fn test_buy_then_sell_at_same_price_round_trips() {
        let mut ledger = default_ledger();
        let before = ledger.capital_remaining();

        ledger.buy("XRPUSDT", 0.6173);
        ledger.sell("XRPUSDT", 0.6173);

        assert!((ledger.capital_remaining() - before).abs() < EPSILON);
        assert_eq!(ledger.holding("XRPUSDT"), 0.0);
    }

    #[test]
    fn test_market_value_marks_open_holdings() {
        let mut ledger = default_ledger();
        ledger.buy("BTCUSDT", 100.0);
        ledger.buy("ETHUSDT", 10.0);

        let value = ledger.market_value(|symbol| match symbol {
            "BTCUSDT" => Some(200.0),
            _ => None,
        });
        assert!((value - 100.0).abs() < EPSILON);
    }
}
