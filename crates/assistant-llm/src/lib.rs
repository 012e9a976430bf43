//! Text generation layer for the finance assistant
//!
//! Provider-agnostic abstraction over LLM text generation, with a
//! Gemini implementation and the market-brief summarizer built on top
//! of it:
//!
//! - [`TextGenerator`] trait for prompt-in, text-out generation
//! - [`providers::GeminiProvider`] against the `generateContent` API
//! - [`summary`] helpers that turn a market brief into an analyst-style
//!   natural-language summary

pub mod error;
pub mod generator;
pub mod providers;
pub mod summary;

// Re-export main types
pub use error::{LLMError, Result};
pub use generator::TextGenerator;
pub use providers::{GeminiConfig, GeminiProvider};
pub use summary::{generate_market_summary, market_summary_prompt};
