// Snapshot comparison and signal generation

use std::collections::HashMap;

use crate::types::{
    AssetSnapshot, Comparison, MissingSide, PriceComparison, TradeSignal, BUY_THRESHOLD_PCT,
    SELL_THRESHOLD_PCT,
};

/// Round to 4 decimal places. Non-finite values pass through unchanged.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Percentage change from `previous` to `current`, rounded to 4 decimals.
///
/// A zero `previous` yields a non-finite result.
pub fn percentage_change(previous: f64, current: f64) -> f64 {
    round4((current - previous) / previous * 100.0)
}

/// Pair two snapshots by symbol.
///
/// Results follow the previous snapshot's order, followed by symbols that
/// only appear in the current one.
pub fn compare(previous: &[AssetSnapshot], current: &[AssetSnapshot]) -> Vec<Comparison> {
    let current_prices: HashMap<&str, f64> = current
        .iter()
        .map(|asset| (asset.symbol.as_str(), asset.price))
        .collect();

    let mut comparisons: Vec<Comparison> = previous
        .iter()
        .map(|prev| match current_prices.get(prev.symbol.as_str()) {
            Some(&current_price) => Comparison::Priced(PriceComparison {
                symbol: prev.symbol.clone(),
                previous_price: prev.price,
                current_price,
                percentage_change: percentage_change(prev.price, current_price),
            }),
            None => Comparison::NoData {
                symbol: prev.symbol.clone(),
                missing: MissingSide::Current,
            },
        })
        .collect();

    comparisons.extend(
        current
            .iter()
            .filter(|cur| !previous.iter().any(|prev| prev.symbol == cur.symbol))
            .map(|cur| Comparison::NoData {
                symbol: cur.symbol.clone(),
                missing: MissingSide::Previous,
            }),
    );

    comparisons
}

/// Map a comparison onto the fixed ±0.01% thresholds.
pub fn signal_for(comparison: &PriceComparison) -> TradeSignal {
    let change = comparison.percentage_change;
    if !change.is_finite() {
        return TradeSignal::Hold;
    }

    if change <= BUY_THRESHOLD_PCT {
        TradeSignal::Buy(comparison.current_price)
    } else if change >= SELL_THRESHOLD_PCT {
        TradeSignal::Sell(comparison.current_price)
    } else {
        TradeSignal::Hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(comparisons: &[Comparison], index: usize) -> &PriceComparison {
        match &comparisons[index] {
            Comparison::Priced(c) => c,
            other => panic!("expected priced comparison, got {:?}", other),
        }
    }

    #[test]
    fn test_percentage_change_rounding() {
        assert_eq!(percentage_change(100.0, 99.99), -0.01);
        assert_eq!(percentage_change(100.0, 101.0), 1.0);
        assert_eq!(percentage_change(3.0, 4.0), 33.3333);
        assert_eq!(percentage_change(50000.0, 50000.0), 0.0);
    }

    #[test]
    fn test_zero_previous_price_is_not_finite() {
        assert!(!percentage_change(0.0, 1.0).is_finite());
        assert!(percentage_change(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_compare_pairs_by_symbol_not_position() {
        let previous = vec![
            AssetSnapshot::new("BTCUSDT", 100.0),
            AssetSnapshot::new("ETHUSDT", 10.0),
        ];
        let current = vec![
            AssetSnapshot::new("ETHUSDT", 11.0),
            AssetSnapshot::new("BTCUSDT", 99.0),
        ];

        let comparisons = compare(&previous, &current);
        assert_eq!(comparisons.len(), 2);

        let btc = priced(&comparisons, 0);
        assert_eq!(btc.symbol, "BTCUSDT");
        assert_eq!(btc.current_price, 99.0);
        assert_eq!(btc.percentage_change, -1.0);

        let eth = priced(&comparisons, 1);
        assert_eq!(eth.symbol, "ETHUSDT");
        assert_eq!(eth.percentage_change, 10.0);
    }

    #[test]
    fn test_compare_reports_missing_symbols() {
        let previous = vec![
            AssetSnapshot::new("BTCUSDT", 100.0),
            AssetSnapshot::new("OLDUSDT", 1.0),
        ];
        let current = vec![
            AssetSnapshot::new("BTCUSDT", 100.0),
            AssetSnapshot::new("NEWUSDT", 2.0),
        ];

        let comparisons = compare(&previous, &current);
        assert_eq!(comparisons.len(), 3);
        assert_eq!(
            comparisons[1],
            Comparison::NoData { symbol: "OLDUSDT".to_string(), missing: MissingSide::Current }
        );
        assert_eq!(
            comparisons[2],
            Comparison::NoData { symbol: "NEWUSDT".to_string(), missing: MissingSide::Previous }
        );
    }

    #[test]
    fn test_signal_thresholds() {
        let make = |change: f64| PriceComparison {
            symbol: "BTCUSDT".to_string(),
            previous_price: 100.0,
            current_price: 99.0,
            percentage_change: change,
        };

        assert_eq!(signal_for(&make(-0.01)), TradeSignal::Buy(99.0));
        assert_eq!(signal_for(&make(-2.5)), TradeSignal::Buy(99.0));
        assert_eq!(signal_for(&make(0.01)), TradeSignal::Sell(99.0));
        assert_eq!(signal_for(&make(0.0099)), TradeSignal::Hold);
        assert_eq!(signal_for(&make(-0.0099)), TradeSignal::Hold);
        assert_eq!(signal_for(&make(f64::INFINITY)), TradeSignal::Hold);
        assert_eq!(signal_for(&make(f64::NAN)), TradeSignal::Hold);
    }
}
