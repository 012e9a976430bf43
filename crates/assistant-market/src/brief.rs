//! Market brief assembly
//!
//! Normalizes raw provider responses into the envelope served to
//! clients: a merged quote/profile summary, the most recent earnings
//! report, and the combined brief. The two summary legs are fetched
//! concurrently, as are the summary and earnings halves of the brief;
//! the sub-results are only combined once both complete, so the output
//! is identical to a sequential fetch.

use crate::api::finnhub::{EarningsEntry, FinnhubClient};
use crate::error::Result;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use tracing::warn;

const NO_EARNINGS_MESSAGE: &str = "No earnings data available.";

/// Merged quote + profile record for one symbol
///
/// Quote numerics stay optional and serialize as `null` when the
/// provider has no data; a missing price must never read as zero.
/// Profile strings carry fallback sentinels instead.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    /// Ticker, uppercased from the caller's input (never taken from a
    /// provider response)
    pub symbol: String,
    pub short_name: String,
    pub current_price: Option<f64>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub previous_close: Option<f64>,
    pub exchange: String,
    pub industry: String,
    pub currency: String,
    pub logo: String,
}

/// Most recent earnings report for one symbol
///
/// The numeric fields serialize as the number when present and the
/// literal string `"N/A"` when absent; `date` passes through as-is.
#[derive(Debug, Clone, Serialize)]
pub struct EarningsRecord {
    pub date: Option<String>,
    #[serde(rename = "epsEstimate", serialize_with = "number_or_na")]
    pub eps_estimate: Option<f64>,
    #[serde(rename = "actualEPS", serialize_with = "number_or_na")]
    pub actual_eps: Option<f64>,
    #[serde(serialize_with = "number_or_na")]
    pub surprise: Option<f64>,
}

/// Failure shape embedded in place of a sub-result
#[derive(Debug, Clone, Serialize)]
pub struct FetchFailure {
    pub error: String,
}

/// Result of a stock summary fetch
///
/// Serialized untagged: either the summary fields or `{"error": ...}`.
/// A fault in either leg of the fetch yields the failure shape whole;
/// there is no partial merge.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SummaryOutcome {
    Summary(StockSummary),
    Failed(FetchFailure),
}

/// Result of an earnings fetch
///
/// Serialized untagged into one of three distinct wire shapes: a
/// populated record, `{"message": ...}` when the provider has no
/// entries, or `{"error": ...}` on a fetch fault. Callers discriminate
/// by which key is present.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EarningsOutcome {
    Report(EarningsRecord),
    NoData { message: String },
    Failed(FetchFailure),
}

/// Combined response envelope for one symbol
#[derive(Debug, Clone, Serialize)]
pub struct MarketBrief {
    pub summary: SummaryOutcome,
    /// Reserved for a price history source no longer wired in; kept for
    /// wire compatibility with consumers expecting the field
    pub history: Vec<serde_json::Value>,
    pub earnings: EarningsOutcome,
}

impl SummaryOutcome {
    /// True if this outcome carries the error shape
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl EarningsOutcome {
    /// True if this outcome carries the error shape
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl EarningsRecord {
    fn from_entry(entry: &EarningsEntry) -> Self {
        Self {
            date: entry.date.clone(),
            eps_estimate: entry.eps_estimate,
            actual_eps: entry.actual,
            surprise: entry.surprise_percent,
        }
    }
}

fn number_or_na<S>(value: &Option<f64>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(n) => serializer.serialize_f64(*n),
        None => serializer.serialize_str("N/A"),
    }
}

/// Pick the most recent entry from a provider calendar
///
/// Provider ordering is not trusted: the entry with the greatest
/// parseable date wins. Entries without a parseable date only matter
/// when no entry has one, in which case the provider's first entry is
/// taken as-is.
fn most_recent(entries: &[EarningsEntry]) -> Option<&EarningsEntry> {
    entries
        .iter()
        .filter_map(|entry| {
            entry
                .date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                .map(|parsed| (parsed, entry))
        })
        .max_by_key(|(parsed, _)| *parsed)
        .map(|(_, entry)| entry)
        .or_else(|| entries.first())
}

impl FinnhubClient {
    /// Fetch the merged quote + profile summary for a symbol
    ///
    /// A fault in either call replaces the whole summary with the
    /// `{"error": ...}` shape; the fault never propagates further.
    pub async fn stock_summary(&self, symbol: &str) -> SummaryOutcome {
        let symbol = symbol.to_uppercase();
        match self.fetch_summary(&symbol).await {
            Ok(summary) => SummaryOutcome::Summary(summary),
            Err(err) => {
                warn!(%symbol, %err, "stock summary fetch failed");
                SummaryOutcome::Failed(FetchFailure {
                    error: format!("Error fetching stock summary for {symbol}: {err}"),
                })
            }
        }
    }

    /// Fetch the most recent earnings report for a symbol
    pub async fn earnings_info(&self, symbol: &str) -> EarningsOutcome {
        let symbol = symbol.to_uppercase();
        match self.fetch_earnings(&symbol).await {
            Ok(Some(record)) => EarningsOutcome::Report(record),
            Ok(None) => EarningsOutcome::NoData {
                message: NO_EARNINGS_MESSAGE.to_string(),
            },
            Err(err) => {
                warn!(%symbol, %err, "earnings fetch failed");
                EarningsOutcome::Failed(FetchFailure {
                    error: format!("Error fetching earnings data for {symbol}: {err}"),
                })
            }
        }
    }

    /// Fetch the combined market brief for a symbol
    ///
    /// Never fails as a whole: each sub-fetch swallows its own fault
    /// into its sub-result, and the caller inspects those independently.
    pub async fn market_brief(&self, symbol: &str) -> MarketBrief {
        let (summary, earnings) =
            tokio::join!(self.stock_summary(symbol), self.earnings_info(symbol));

        MarketBrief {
            summary,
            history: Vec::new(),
            earnings,
        }
    }

    async fn fetch_summary(&self, symbol: &str) -> Result<StockSummary> {
        // The two legs are independent; both must succeed.
        let (quote, profile) =
            tokio::try_join!(self.quote(symbol), self.company_profile(symbol))?;

        Ok(StockSummary {
            symbol: symbol.to_string(),
            short_name: profile.name.unwrap_or_else(|| "N/A".to_string()),
            current_price: quote.current,
            open: quote.open,
            high: quote.high,
            low: quote.low,
            previous_close: quote.previous_close,
            exchange: profile.exchange.unwrap_or_else(|| "N/A".to_string()),
            industry: profile.industry.unwrap_or_else(|| "N/A".to_string()),
            currency: profile.currency.unwrap_or_else(|| "USD".to_string()),
            logo: profile.logo.unwrap_or_default(),
        })
    }

    async fn fetch_earnings(&self, symbol: &str) -> Result<Option<EarningsRecord>> {
        let calendar = self.earnings_calendar(symbol).await?;
        Ok(most_recent(&calendar.earnings_calendar).map(EarningsRecord::from_entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(date: Option<&str>, estimate: Option<f64>) -> EarningsEntry {
        EarningsEntry {
            date: date.map(String::from),
            eps_estimate: estimate,
            actual: None,
            surprise_percent: None,
        }
    }

    #[test]
    fn test_most_recent_ignores_provider_order() {
        let entries = vec![
            entry(Some("2024-04-25"), Some(1.0)),
            entry(Some("2025-01-30"), Some(2.0)),
            entry(Some("2024-10-31"), Some(3.0)),
        ];

        let picked = most_recent(&entries).unwrap();
        assert_eq!(picked.date.as_deref(), Some("2025-01-30"));
    }

    #[test]
    fn test_most_recent_falls_back_to_first_without_dates() {
        let entries = vec![
            entry(Some("not-a-date"), Some(1.0)),
            entry(None, Some(2.0)),
        ];

        let picked = most_recent(&entries).unwrap();
        assert_eq!(picked.eps_estimate, Some(1.0));
    }

    #[test]
    fn test_most_recent_empty() {
        assert!(most_recent(&[]).is_none());
    }

    #[test]
    fn test_earnings_record_serializes_na_for_missing() {
        let record = EarningsRecord {
            date: None,
            eps_estimate: Some(2.35),
            actual_eps: None,
            surprise: None,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "date": null,
                "epsEstimate": 2.35,
                "actualEPS": "N/A",
                "surprise": "N/A",
            })
        );
    }

    #[test]
    fn test_outcome_wire_shapes() {
        let failed = SummaryOutcome::Failed(FetchFailure {
            error: "Error fetching stock summary for AAPL: boom".to_string(),
        });
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(
            value,
            json!({"error": "Error fetching stock summary for AAPL: boom"})
        );

        let no_data = EarningsOutcome::NoData {
            message: NO_EARNINGS_MESSAGE.to_string(),
        };
        let value = serde_json::to_value(&no_data).unwrap();
        assert_eq!(value, json!({"message": "No earnings data available."}));
    }

    #[test]
    fn test_summary_field_names_are_camel_case() {
        let summary = StockSummary {
            symbol: "AAPL".to_string(),
            short_name: "Apple Inc".to_string(),
            current_price: Some(189.5),
            open: None,
            high: None,
            low: None,
            previous_close: Some(186.2),
            exchange: "NASDAQ".to_string(),
            industry: "Technology".to_string(),
            currency: "USD".to_string(),
            logo: String::new(),
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["shortName"], "Apple Inc");
        assert_eq!(value["currentPrice"], 189.5);
        assert_eq!(value["previousClose"], 186.2);
        // Absent quote numerics are null, never zero
        assert_eq!(value["open"], serde_json::Value::Null);
    }
}
