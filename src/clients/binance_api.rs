// Binance public ticker price client

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::PriceFeed;
use crate::config::FeedConfig;
use crate::types::AssetSnapshot;

/// Raw row of the ticker price endpoint. Prices arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: String,
}

#[derive(Debug)]
pub struct BinanceTickerClient {
    client: reqwest::Client,
    endpoint: String,
    quote_suffix: String,
    max_assets: usize,
}

impl BinanceTickerClient {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            quote_suffix: config.quote_suffix.clone(),
            max_assets: config.max_assets,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch every ticker the endpoint publishes
    pub async fn fetch_tickers(&self) -> Result<Vec<TickerPrice>, BinanceApiError> {
        let response = self.client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BinanceApiError::Timeout(e.to_string())
                } else {
                    BinanceApiError::Network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(BinanceApiError::Http(response.status().as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| BinanceApiError::Network(e.to_string()))?;

        parse_tickers(&body)
    }

    /// Fetch and filter the tracked assets, surfacing any failure
    pub async fn try_fetch_top_assets(&self) -> Result<Vec<AssetSnapshot>, BinanceApiError> {
        let tickers = self.fetch_tickers().await?;
        let assets = select_top_assets(&tickers, &self.quote_suffix, self.max_assets);

        debug!(
            tickers = tickers.len(),
            selected = assets.len(),
            suffix = %self.quote_suffix,
            "fetched ticker prices"
        );

        Ok(assets)
    }
}

#[async_trait]
impl PriceFeed for BinanceTickerClient {
    async fn fetch_top_assets(&self) -> Vec<AssetSnapshot> {
        match self.try_fetch_top_assets().await {
            Ok(assets) => assets,
            Err(e) => {
                warn!(error = %e, endpoint = %self.endpoint, "Error fetching assets");
                Vec::new()
            }
        }
    }
}

/// Decode a ticker price response body.
pub fn parse_tickers(body: &[u8]) -> Result<Vec<TickerPrice>, BinanceApiError> {
    serde_json::from_slice(body).map_err(|e| BinanceApiError::Parse(e.to_string()))
}

/// Keep pairs quoted in `suffix`, in feed order, up to `limit`.
///
/// Rows whose price is not a finite positive number are skipped before the
/// limit applies, so unusable rows do not count toward the first `limit`
/// pairs the way a plain filter-then-truncate over the raw feed would.
pub fn select_top_assets(tickers: &[TickerPrice], suffix: &str, limit: usize) -> Vec<AssetSnapshot> {
    tickers
        .iter()
        .filter(|ticker| ticker.symbol.ends_with(suffix))
        .filter_map(|ticker| match ticker.price.trim().parse::<f64>() {
            Ok(price) if price.is_finite() && price > 0.0 => {
                Some(AssetSnapshot::new(ticker.symbol.clone(), price))
            }
            _ => {
                debug!(symbol = %ticker.symbol, price = %ticker.price, "skipping unusable price");
                None
            }
        })
        .take(limit)
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum BinanceApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP error: {0}")]
    Http(u16),

    #[error("Parse error: {0}")]
    Parse(String),
}
