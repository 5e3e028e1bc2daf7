// External API clients

pub mod binance_api;

use async_trait::async_trait;

use crate::types::AssetSnapshot;

// Re-export client types
pub use binance_api::{parse_tickers, select_top_assets, BinanceApiError, BinanceTickerClient, TickerPrice};

/// Source of per-cycle price snapshots.
///
/// Implementations never fail: an unavailable feed yields an empty vector,
/// which the decision loop treats as "no data this cycle".
#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn fetch_top_assets(&self) -> Vec<AssetSnapshot>;
}
