//! Shared application state

use std::sync::Arc;

use assistant_llm::{GeminiProvider, TextGenerator};
use assistant_market::FinnhubClient;
use assistant_speech::{SpeechClient, TranscriptionClient};

/// Handles to the backing services, shared across handlers
///
/// Built once at startup; every field is cheaply cloneable. The text
/// backend sits behind the trait object so tests swap in a stub.
#[derive(Clone)]
pub struct AppState {
    pub market: Arc<FinnhubClient>,
    pub generator: Arc<dyn TextGenerator>,
    pub transcriber: Arc<TranscriptionClient>,
    pub speech: Arc<SpeechClient>,
}

impl AppState {
    /// Build the state from process environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            market: Arc::new(FinnhubClient::from_env()?),
            generator: Arc::new(GeminiProvider::from_env()?),
            transcriber: Arc::new(TranscriptionClient::from_env()?),
            speech: Arc::new(SpeechClient::from_env()?),
        })
    }
}
