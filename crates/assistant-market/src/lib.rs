//! Market data aggregation for the finance assistant
//!
//! This crate talks to a Finnhub-compatible market data provider and
//! normalizes the responses into the market brief served by the API:
//!
//! - Real-time quote + company profile, merged into a stock summary
//! - Most recent earnings report over a configurable calendar window
//! - The combined market brief envelope (summary + earnings)
//!
//! Each fetch is all-or-nothing: a transport or decoding fault anywhere
//! in a fetch replaces that sub-result with an `{"error": ...}`-shaped
//! value instead of a partial record. The brief itself never fails; the
//! caller inspects the nested sub-results.
//!
//! # Example
//!
//! ```rust,ignore
//! use assistant_market::{FinnhubClient, MarketConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = MarketConfig::from_env()?;
//!     let client = FinnhubClient::with_config(config)?;
//!
//!     let brief = client.market_brief("AAPL").await;
//!     println!("{}", serde_json::to_string_pretty(&brief)?);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod brief;
pub mod config;
pub mod error;

// Re-export main types for convenience
pub use api::FinnhubClient;
pub use brief::{
    EarningsOutcome, EarningsRecord, FetchFailure, MarketBrief, StockSummary, SummaryOutcome,
};
pub use config::MarketConfig;
pub use error::{MarketError, Result};
