//! Audio transcription client
//!
//! Talks to a whisper.cpp-style inference server over HTTP. The server
//! accepts a multipart upload and answers `{"text": ...}`.

use crate::error::{Result, SpeechError};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_WHISPER_API_BASE: &str = "http://127.0.0.1:8080";
// Transcription of long recordings is slow on CPU.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Configuration for the transcription client
#[derive(Debug, Clone)]
pub struct WhisperConfig {
    /// Base URL of the inference server (default: "http://127.0.0.1:8080")
    pub api_base: String,

    /// Request timeout in seconds (default: 300)
    pub timeout_secs: u64,
}

impl WhisperConfig {
    /// Create a config pointing at the given server
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads `WHISPER_API_BASE` when set, otherwise uses the local
    /// default.
    pub fn from_env() -> Self {
        let api_base = std::env::var("WHISPER_API_BASE")
            .unwrap_or_else(|_| DEFAULT_WHISPER_API_BASE.to_string());
        Self::new(api_base)
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WHISPER_API_BASE)
    }
}

#[derive(Debug, Deserialize)]
struct InferenceResponse {
    text: Option<String>,
}

/// Client for a Whisper-compatible transcription server
pub struct TranscriptionClient {
    client: Client,
    config: WhisperConfig,
}

impl TranscriptionClient {
    /// Create a new client from an explicit configuration
    pub fn with_config(config: WhisperConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client from `WHISPER_API_BASE` (defaults to localhost)
    pub fn from_env() -> Result<Self> {
        Self::with_config(WhisperConfig::from_env())
    }

    /// Get the current configuration
    pub fn config(&self) -> &WhisperConfig {
        &self.config
    }

    /// Transcribe an uploaded audio file
    ///
    /// The bytes go to the server as the `file` part under the caller's
    /// original filename; the server sniffs the container format from
    /// the content.
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    pub async fn transcribe(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let form = Form::new()
            .part(
                "file",
                Part::bytes(bytes).file_name(file_name.to_string()),
            )
            .text("response_format", "json");

        let url = format!("{}/inference", self.config.api_base);
        let response = self.client.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpeechError::RequestFailed(format!(
                "HTTP {status}: {error_text}"
            )));
        }

        let body: InferenceResponse = response.json().await.map_err(|e| {
            SpeechError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        match body.text {
            Some(text) => {
                debug!(chars = text.len(), "transcription received");
                Ok(text.trim().to_string())
            }
            None => Err(SpeechError::UnexpectedResponse(
                "No text field in response".to_string(),
            )),
        }
    }
}
