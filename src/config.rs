// Configuration management for the price grid bot
//
// Every field has a default equal to the bot's fixed parameters, so the bot
// runs without a config file. Thresholds are not configurable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::types::{
    GRID_PARTITIONS, POLL_INTERVAL_SECS, QUOTE_SUFFIX, STARTING_CAPITAL, TICKER_PRICE_URL,
    TOP_ASSET_COUNT,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_quote_suffix")]
    pub quote_suffix: String,
    #[serde(default = "default_max_assets")]
    pub max_assets: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_starting_capital")]
    pub starting_capital: f64,
    #[serde(default = "default_partitions")]
    pub partitions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// Default value functions
fn default_endpoint() -> String { TICKER_PRICE_URL.to_string() }
fn default_quote_suffix() -> String { QUOTE_SUFFIX.to_string() }
fn default_max_assets() -> usize { TOP_ASSET_COUNT }
fn default_starting_capital() -> f64 { STARTING_CAPITAL }
fn default_partitions() -> usize { GRID_PARTITIONS }
fn default_poll_interval() -> u64 { POLL_INTERVAL_SECS }
fn default_log_level() -> String { "info".to_string() }

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            quote_suffix: default_quote_suffix(),
            max_assets: default_max_assets(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            starting_capital: default_starting_capital(),
            partitions: default_partitions(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ScheduleConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, content)
            .map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// Load configuration from a file that must exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if !path.as_ref().exists() {
            return Err(ConfigError::NotFound(path.as_ref().display().to_string()));
        }
        Self::from_file(path)
    }

    /// Load configuration from file, falling back to defaults if the file doesn't exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.as_ref().display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation("feed.endpoint must not be empty".to_string()));
        }

        if self.feed.max_assets == 0 {
            return Err(ConfigError::Validation("feed.max_assets must be greater than 0".to_string()));
        }

        if !(self.grid.starting_capital > 0.0 && self.grid.starting_capital.is_finite()) {
            return Err(ConfigError::Validation("grid.starting_capital must be positive".to_string()));
        }

        if self.grid.partitions == 0 {
            return Err(ConfigError::Validation("grid.partitions must be greater than 0".to_string()));
        }

        if self.schedule.poll_interval_secs == 0 {
            return Err(ConfigError::Validation("schedule.poll_interval_secs must be greater than 0".to_string()));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to read config file: {0}")]
    FileRead(String),

    #[error("Failed to write config file: {0}")]
    FileWrite(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
