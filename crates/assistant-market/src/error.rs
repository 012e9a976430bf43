//! Error types for market data operations

use thiserror::Error;

/// Market data specific errors
#[derive(Debug, Error)]
pub enum MarketError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Provider answered with a non-success HTTP status
    #[error("Provider error: HTTP {status}")]
    ProviderStatus {
        status: u16,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for market data operations
pub type Result<T> = std::result::Result<T, MarketError>;
