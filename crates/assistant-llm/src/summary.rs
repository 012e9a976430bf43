//! Market brief summarization
//!
//! Builds the analyst prompt around a serialized market brief and asks
//! a [`TextGenerator`] for the natural-language summary. Takes the
//! brief as a JSON value so this crate stays independent of the market
//! data types.

use crate::{Result, TextGenerator};

/// Build the summarization prompt for a market brief
pub fn market_summary_prompt(brief: &serde_json::Value) -> String {
    format!(
        "You are a financial assistant. Write a short, plain-English market \
         summary for a retail investor based on the data below. Mention the \
         current price and how it compares to the previous close, the \
         company's industry, and the latest earnings result if one is \
         present. If a section contains an \"error\" field, say that data \
         is currently unavailable instead of guessing. Keep it under 120 \
         words and do not invent numbers.\n\nMarket data:\n{brief}"
    )
}

/// Generate a natural-language summary for a market brief
pub async fn generate_market_summary(
    generator: &dyn TextGenerator,
    brief: &serde_json::Value,
) -> Result<String> {
    let prompt = market_summary_prompt(brief);
    generator.generate(&prompt).await
}
