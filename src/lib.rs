// Price Grid Bot Library
//
// Paper-trading bot that polls ticker prices, compares consecutive snapshots
// and spends a fixed grid allocation on dips, liquidating on rises

pub mod types;
pub mod core;
pub mod clients;
pub mod config;
pub mod error;       // Unified error handling
pub mod reporter;

// Re-export core trading types
pub use crate::types::{
    AssetSnapshot, BotStatus, Comparison, MissingSide, PriceComparison, Snapshot, StopReason,
    TradeOutcome, TradeSignal,
};
pub use crate::core::{forward_shutdown_signal, BotState, CycleReport, GridAllocation, Ledger, TradingBot};

// Re-export error types
pub use crate::error::{TradingError, TradingResult};

// Re-export client types
pub use crate::clients::{BinanceApiError, BinanceTickerClient, PriceFeed};

// Re-export configuration
pub use crate::config::{Config, ConfigError, FeedConfig, GridConfig, LoggingConfig, ScheduleConfig};

// Re-export reporting
pub use crate::reporter::{ConsoleReporter, Reporter};
