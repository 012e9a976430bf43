//! Text generator trait definition

use crate::Result;
use async_trait::async_trait;

/// Trait for prompt-in, text-out generation backends
///
/// Implementations wrap a concrete LLM service (e.g. Gemini). The
/// facade depends only on this trait, so tests swap in a stub.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a text completion for a free-form prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the backend name (e.g. "gemini")
    fn name(&self) -> &str;
}
