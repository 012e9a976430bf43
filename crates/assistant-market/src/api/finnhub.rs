//! Finnhub API client

use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Finnhub API client
///
/// Thin wrapper over the provider's REST endpoints. Each method issues a
/// single read-only GET, checks the HTTP status, and decodes the JSON
/// body into a typed response. Normalization into the brief shapes lives
/// in [`crate::brief`].
#[derive(Debug, Clone)]
pub struct FinnhubClient {
    client: Client,
    config: MarketConfig,
}

/// Real-time quote fields, as returned by `GET /quote`
///
/// All fields are optional: the provider omits or nulls them for symbols
/// it has no data for, and that is not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteResponse {
    /// Current price
    #[serde(rename = "c")]
    pub current: Option<f64>,
    /// Open price of the day
    #[serde(rename = "o")]
    pub open: Option<f64>,
    /// High price of the day
    #[serde(rename = "h")]
    pub high: Option<f64>,
    /// Low price of the day
    #[serde(rename = "l")]
    pub low: Option<f64>,
    /// Previous close price
    #[serde(rename = "pc")]
    pub previous_close: Option<f64>,
}

/// Company profile fields, as returned by `GET /stock/profile2`
///
/// The provider returns an empty object for unknown symbols, so every
/// field deserializes to `None` in that case.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileResponse {
    pub name: Option<String>,
    pub exchange: Option<String>,
    #[serde(rename = "finnhubIndustry")]
    pub industry: Option<String>,
    pub currency: Option<String>,
    pub logo: Option<String>,
}

/// Earnings calendar payload, as returned by `GET /calendar/earnings`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EarningsCalendarResponse {
    #[serde(default, rename = "earningsCalendar")]
    pub earnings_calendar: Vec<EarningsEntry>,
}

/// One scheduled or reported earnings event
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EarningsEntry {
    pub date: Option<String>,
    #[serde(rename = "epsEstimate")]
    pub eps_estimate: Option<f64>,
    pub actual: Option<f64>,
    #[serde(rename = "surprisePercent")]
    pub surprise_percent: Option<f64>,
}

impl FinnhubClient {
    /// Create a new client from an explicit configuration
    pub fn with_config(config: MarketConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client from `FINNHUB_API_KEY` (and optional `FINNHUB_API_BASE`)
    pub fn from_env() -> Result<Self> {
        Self::with_config(MarketConfig::from_env()?)
    }

    /// Get the current configuration
    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Get the real-time quote for a symbol
    #[instrument(skip(self))]
    pub async fn quote(&self, symbol: &str) -> Result<QuoteResponse> {
        self.get_json("/quote", &[("symbol", symbol)]).await
    }

    /// Get the company profile for a symbol
    #[instrument(skip(self))]
    pub async fn company_profile(&self, symbol: &str) -> Result<ProfileResponse> {
        self.get_json("/stock/profile2", &[("symbol", symbol)]).await
    }

    /// Get the earnings calendar for a symbol over the configured window
    #[instrument(skip(self))]
    pub async fn earnings_calendar(&self, symbol: &str) -> Result<EarningsCalendarResponse> {
        let from = self.config.earnings_from.to_string();
        let to = self.config.earnings_to.to_string();
        self.get_json(
            "/calendar/earnings",
            &[("symbol", symbol), ("from", from.as_str()), ("to", to.as_str())],
        )
        .await
    }

    /// Issue a GET against the provider and decode the JSON body
    ///
    /// The API key rides along as the `token` query parameter on every
    /// call. Non-success statuses are surfaced before decoding so a
    /// provider error page never reads as a JSON fault.
    async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.config.api_base, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("token", self.config.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketError::ProviderStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(url, bytes = body.len(), "provider response received");
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = FinnhubClient::with_config(MarketConfig::new("test_key")).unwrap();
        assert_eq!(client.config().api_key, "test_key");
        assert_eq!(client.config().api_base, "https://finnhub.io/api/v1");
    }

    #[tokio::test]
    async fn test_quote_decodes_optional_fields() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/quote")
            .match_query(mockito::Matcher::Any)
            .with_body(r#"{"c": 189.5, "o": 187.0, "h": null, "pc": 186.2}"#)
            .create_async()
            .await;

        let config = MarketConfig::new("k").with_api_base(server.url());
        let client = FinnhubClient::with_config(config).unwrap();

        let quote = client.quote("AAPL").await.unwrap();
        assert_eq!(quote.current, Some(189.5));
        assert_eq!(quote.open, Some(187.0));
        assert_eq!(quote.high, None);
        assert_eq!(quote.low, None);
        assert_eq!(quote.previous_close, Some(186.2));
    }

    #[tokio::test]
    async fn test_non_success_status_is_provider_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/quote")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let config = MarketConfig::new("k").with_api_base(server.url());
        let client = FinnhubClient::with_config(config).unwrap();

        let err = client.quote("AAPL").await.unwrap_err();
        assert!(matches!(err, MarketError::ProviderStatus { status: 500 }));
    }

    #[tokio::test]
    async fn test_non_json_body_is_json_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/stock/profile2")
            .match_query(mockito::Matcher::Any)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let config = MarketConfig::new("k").with_api_base(server.url());
        let client = FinnhubClient::with_config(config).unwrap();

        let err = client.company_profile("AAPL").await.unwrap_err();
        assert!(matches!(err, MarketError::JsonError(_)));
    }

    #[tokio::test]
    async fn test_missing_calendar_key_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/calendar/earnings")
            .match_query(mockito::Matcher::Any)
            .with_body("{}")
            .create_async()
            .await;

        let config = MarketConfig::new("k").with_api_base(server.url());
        let client = FinnhubClient::with_config(config).unwrap();

        let calendar = client.earnings_calendar("AAPL").await.unwrap();
        assert!(calendar.earnings_calendar.is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_live_quote() {
        let client = FinnhubClient::from_env().unwrap();
        let quote = client.quote("AAPL").await.unwrap();
        assert!(quote.current.is_some());
    }
}
