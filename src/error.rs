//! Unified error handling for the price grid bot
//!
//! Module-level errors (`ConfigError`, `BinanceApiError`) convert into
//! `TradingError` so the CLI can report them with actionable context.
//! Trading preconditions are not errors; see `TradeOutcome`.

use std::fmt;
use std::io;

use crate::clients::BinanceApiError;
use crate::config::ConfigError;

/// Main error type for the price grid bot
#[derive(Debug)]
pub enum TradingError {
    // Configuration errors
    ConfigNotFound(String),
    ConfigParse(String),
    ConfigValidation(String),

    // API errors
    ApiConnection(String),
    ApiResponse(String),
    ApiTimeout(String),
    ApiParse(String),

    // IO errors
    FileRead(String),
    FileWrite(String),

    // General errors
    Internal(String),
}

impl TradingError {
    /// Get a user-friendly error message with helpful context
    pub fn user_message(&self) -> String {
        match self {
            TradingError::ConfigNotFound(path) => {
                format!(
                    "Configuration file not found: {}\n\n\
                    💡 Quick fix:\n\
                    1. Run: grid-bot init\n\
                    2. Adjust config.toml if needed\n\
                    3. Try again",
                    path
                )
            }
            TradingError::ConfigValidation(msg) => {
                format!(
                    "Configuration validation error: {}\n\n\
                    💡 Check config.toml for:\n\
                    - Positive starting capital\n\
                    - At least one grid partition\n\
                    - Non-zero poll interval",
                    msg
                )
            }
            TradingError::ApiConnection(msg) => {
                format!(
                    "Could not reach the price feed: {}\n\n\
                    💡 Check your network connection and feed.endpoint in config.toml",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TradingError::ApiTimeout(_) | TradingError::ApiConnection(_)
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            TradingError::ConfigNotFound(_)
            | TradingError::ConfigParse(_)
            | TradingError::ConfigValidation(_) => "config",

            TradingError::ApiConnection(_)
            | TradingError::ApiResponse(_)
            | TradingError::ApiTimeout(_)
            | TradingError::ApiParse(_) => "api",

            TradingError::FileRead(_) | TradingError::FileWrite(_) => "io",

            TradingError::Internal(_) => "internal",
        }
    }
}

impl fmt::Display for TradingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradingError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path)
            }
            TradingError::ConfigParse(msg) => {
                write!(f, "Configuration parse error: {}", msg)
            }
            TradingError::ConfigValidation(msg) => {
                write!(f, "Configuration validation error: {}", msg)
            }
            TradingError::ApiConnection(msg) => {
                write!(f, "API connection error: {}", msg)
            }
            TradingError::ApiResponse(msg) => {
                write!(f, "API response error: {}", msg)
            }
            TradingError::ApiTimeout(msg) => {
                write!(f, "API timeout: {}", msg)
            }
            TradingError::ApiParse(msg) => {
                write!(f, "API parse error: {}", msg)
            }
            TradingError::FileRead(msg) => {
                write!(f, "File read error: {}", msg)
            }
            TradingError::FileWrite(msg) => {
                write!(f, "File write error: {}", msg)
            }
            TradingError::Internal(msg) => {
                write!(f, "Internal error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TradingError {}

impl From<io::Error> for TradingError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => TradingError::FileRead(err.to_string()),
            io::ErrorKind::PermissionDenied => TradingError::FileWrite(err.to_string()),
            io::ErrorKind::TimedOut => TradingError::ApiTimeout(err.to_string()),
            _ => TradingError::Internal(format!("IO error: {}", err)),
        }
    }
}

impl From<ConfigError> for TradingError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound(path) => TradingError::ConfigNotFound(path),
            ConfigError::FileRead(msg) => TradingError::FileRead(msg),
            ConfigError::FileWrite(msg) => TradingError::FileWrite(msg),
            ConfigError::Parse(msg) | ConfigError::Serialize(msg) => TradingError::ConfigParse(msg),
            ConfigError::Validation(msg) => TradingError::ConfigValidation(msg),
        }
    }
}

impl From<BinanceApiError> for TradingError {
    fn from(err: BinanceApiError) -> Self {
        match err {
            BinanceApiError::Timeout(msg) => TradingError::ApiTimeout(msg),
            BinanceApiError::Network(msg) => TradingError::ApiConnection(msg),
            BinanceApiError::Http(status) => {
                TradingError::ApiResponse(format!("HTTP status {}", status))
            }
            BinanceApiError::Parse(msg) => TradingError::ApiParse(msg),
        }
    }
}

/// Result type alias using TradingError
pub type TradingResult<T> = Result<T, TradingError>;
