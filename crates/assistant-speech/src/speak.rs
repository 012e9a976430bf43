//! Text-to-speech client
//!
//! Calls an OpenAI-compatible `audio/speech` endpoint and returns the
//! synthesized audio bytes. Works against api.openai.com or any local
//! server speaking the same protocol.

use crate::error::{Result, SpeechError};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_TTS_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TTS_MODEL: &str = "tts-1";
const DEFAULT_TTS_VOICE: &str = "alloy";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the text-to-speech client
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// API key for bearer authentication
    pub api_key: String,

    /// Base URL (default: "https://api.openai.com/v1")
    pub api_base: String,

    /// Synthesis model (default: "tts-1")
    pub model: String,

    /// Voice preset (default: "alloy")
    pub voice: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl TtsConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_TTS_API_BASE.to_string(),
            model: DEFAULT_TTS_MODEL.to_string(),
            voice: DEFAULT_TTS_VOICE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `OPENAI_API_KEY`; optionally reads
    /// `TTS_API_BASE`, `TTS_MODEL`, and `TTS_VOICE` when set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            SpeechError::ConfigurationError(
                "OPENAI_API_KEY environment variable not set".to_string(),
            )
        })?;

        let mut config = Self::new(api_key);
        if let Ok(base) = std::env::var("TTS_API_BASE") {
            config.api_base = base;
        }
        if let Ok(model) = std::env::var("TTS_MODEL") {
            config.model = model;
        }
        if let Ok(voice) = std::env::var("TTS_VOICE") {
            config.voice = voice;
        }
        Ok(config)
    }

    /// Set a custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the voice preset
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

#[derive(Debug, Serialize)]
struct TtsRequest {
    model: String,
    input: String,
    voice: String,
}

/// Client for an OpenAI-compatible speech synthesis endpoint
pub struct SpeechClient {
    client: Client,
    config: TtsConfig,
}

impl SpeechClient {
    /// Create a new client from an explicit configuration
    pub fn with_config(config: TtsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(TtsConfig::from_env()?)
    }

    /// Get the current configuration
    pub fn config(&self) -> &TtsConfig {
        &self.config
    }

    /// Synthesize speech for the given text, returning mp3 bytes
    #[instrument(skip(self, text), fields(chars = text.len(), voice = %self.config.voice))]
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        let body = TtsRequest {
            model: self.config.model.clone(),
            input: text.to_string(),
            voice: self.config.voice.clone(),
        };

        let url = format!("{}/audio/speech", self.config.api_base);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => SpeechError::AuthenticationFailed,
                _ => SpeechError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let bytes = response.bytes().await?.to_vec();
        debug!(bytes = bytes.len(), "synthesized audio received");
        Ok(bytes)
    }
}
