// Common test utilities and helpers
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use price_grid_bot::{
    AssetSnapshot, Comparison, Config, FeedConfig, GridConfig, Ledger, LoggingConfig, PriceFeed,
    Reporter, ScheduleConfig, StopReason, TradeOutcome,
};

/// Create a test configuration with the default fixed parameters
pub fn create_test_config() -> Config {
    Config {
        feed: FeedConfig {
            endpoint: "http://127.0.0.1:9/api/v3/ticker/price".to_string(),
            quote_suffix: "USDT".to_string(),
            max_assets: 10,
        },
        grid: GridConfig {
            starting_capital: 100.0,
            partitions: 10,
        },
        schedule: ScheduleConfig {
            poll_interval_secs: 10,
        },
        logging: LoggingConfig {
            level: "warn".to_string(),
        },
    }
}

/// Build a snapshot vector from `(symbol, price)` pairs
pub fn assets(pairs: &[(&str, f64)]) -> Vec<AssetSnapshot> {
    pairs
        .iter()
        .map(|(symbol, price)| AssetSnapshot::new(*symbol, *price))
        .collect()
}

/// Feed that replays queued snapshots, then returns empty vectors
#[derive(Default)]
pub struct ScriptedFeed {
    snapshots: Mutex<VecDeque<Vec<AssetSnapshot>>>,
    calls: AtomicUsize,
}

impl ScriptedFeed {
    pub fn new(snapshots: Vec<Vec<AssetSnapshot>>) -> Self {
        Self {
            snapshots: Mutex::new(snapshots.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceFeed for ScriptedFeed {
    async fn fetch_top_assets(&self) -> Vec<AssetSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.snapshots
            .lock()
            .expect("feed lock poisoned")
            .pop_front()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    Balance(f64),
    Comparisons(Vec<Comparison>),
    Trade(TradeOutcome),
    Stopped(StopReason),
}

/// Reporter that records every call instead of printing
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<ReportEvent>,
}

impl RecordingReporter {
    pub fn balances(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Balance(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn trades(&self) -> Vec<&TradeOutcome> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Trade(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    pub fn stop_reasons(&self) -> Vec<StopReason> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Stopped(r) => Some(*r),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn balance(&mut self, capital_remaining: f64) {
        self.events.push(ReportEvent::Balance(capital_remaining));
    }

    fn comparisons(&mut self, comparisons: &[Comparison]) {
        self.events.push(ReportEvent::Comparisons(comparisons.to_vec()));
    }

    fn trade(&mut self, outcome: &TradeOutcome) {
        self.events.push(ReportEvent::Trade(outcome.clone()));
    }

    fn stopped(&mut self, reason: StopReason, _ledger: &Ledger, _last_price: &dyn Fn(&str) -> Option<f64>) {
        self.events.push(ReportEvent::Stopped(reason));
    }
}
