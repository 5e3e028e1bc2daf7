// Common types used across the application

use chrono::{DateTime, Utc};

// Fixed trading parameters
pub const TICKER_PRICE_URL: &str = "https://api.binance.com/api/v3/ticker/price";
pub const QUOTE_SUFFIX: &str = "USDT";
pub const TOP_ASSET_COUNT: usize = 10;
pub const STARTING_CAPITAL: f64 = 100.0;
pub const GRID_PARTITIONS: usize = 10;
pub const POLL_INTERVAL_SECS: u64 = 10;
pub const BUY_THRESHOLD_PCT: f64 = -0.01;  // Buy on a drop of 0.01% or more
pub const SELL_THRESHOLD_PCT: f64 = 0.01;  // Sell on a rise of 0.01% or more

/// One tracked pair at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetSnapshot {
    pub symbol: String,
    pub price: f64,
}

impl AssetSnapshot {
    pub fn new(symbol: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
        }
    }
}

/// The full set of tracked assets from a single poll, in feed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub taken_at: DateTime<Utc>,
    pub assets: Vec<AssetSnapshot>,
}

impl Snapshot {
    pub fn new(assets: Vec<AssetSnapshot>) -> Self {
        Self {
            taken_at: Utc::now(),
            assets,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn price_of(&self, symbol: &str) -> Option<f64> {
        self.assets
            .iter()
            .find(|asset| asset.symbol == symbol)
            .map(|asset| asset.price)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceComparison {
    pub symbol: String,
    pub previous_price: f64,
    pub current_price: f64,
    pub percentage_change: f64,  // Rounded to 4 decimal places
}

/// Which side of a comparison had no price for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSide {
    Previous,  // Symbol entered the tracked set this cycle
    Current,   // Symbol dropped out of the tracked set this cycle
}

#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Priced(PriceComparison),
    NoData { symbol: String, missing: MissingSide },
}

impl Comparison {
    pub fn symbol(&self) -> &str {
        match self {
            Comparison::Priced(c) => &c.symbol,
            Comparison::NoData { symbol, .. } => symbol,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TradeSignal {
    Buy(f64),   // Buy at current price
    Sell(f64),  // Sell at current price
    Hold,
}

/// Result of a single ledger mutation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum TradeOutcome {
    Bought { symbol: String, quantity: f64, price: f64 },
    Sold { symbol: String, quantity: f64, price: f64, proceeds: f64 },
    InsufficientCapital { symbol: String, capital_remaining: f64 },
    NothingToSell { symbol: String },
}

impl TradeOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, TradeOutcome::Bought { .. } | TradeOutcome::Sold { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotStatus {
    Running,
    Stopped(StopReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    CapitalExhausted,
    ShutdownRequested,
    CycleLimitReached,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::CapitalExhausted => write!(f, "Insufficient Capital"),
            StopReason::ShutdownRequested => write!(f, "Shutdown requested"),
            StopReason::CycleLimitReached => write!(f, "Cycle limit reached"),
        }
    }
}
