//! Configuration for the market data client

use crate::error::{MarketError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE: &str = "https://finnhub.io/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the market data client
///
/// Constructed explicitly and handed to [`crate::FinnhubClient`] so the
/// fetchers never read ambient global state. `from_env` exists for the
/// server binary; tests build fixture configs directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Provider API key, sent as the `token` query parameter
    pub api_key: String,

    /// Base URL of the provider (default: "https://finnhub.io/api/v1")
    pub api_base: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// Start of the earnings calendar window (inclusive)
    pub earnings_from: NaiveDate,

    /// End of the earnings calendar window (inclusive)
    pub earnings_to: NaiveDate,
}

impl MarketConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `FINNHUB_API_KEY` and optionally the base
    /// URL from `FINNHUB_API_BASE`. The key is not validated beyond
    /// presence; a bad key simply surfaces as a fetch error upstream.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("FINNHUB_API_KEY").map_err(|_| {
            MarketError::ConfigError("FINNHUB_API_KEY environment variable not set".to_string())
        })?;

        let mut config = Self::new(api_key);
        if let Ok(base) = std::env::var("FINNHUB_API_BASE") {
            config.api_base = base;
        }
        Ok(config)
    }

    /// Set a custom base URL (e.g. a stub server in tests)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the earnings calendar window
    pub fn with_earnings_window(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.earnings_from = from;
        self.earnings_to = to;
        self
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            // Window carried over from the previous deployment; wide
            // enough to always contain the latest report.
            earnings_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            earnings_to: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap_or_default(),
        }
    }
}
