//! Error types for speech operations

use thiserror::Error;

/// Result type for speech operations
pub type Result<T> = std::result::Result<T, SpeechError>;

/// Errors that can occur during transcription or synthesis
#[derive(Error, Debug)]
pub enum SpeechError {
    /// Engine answered with a non-success HTTP status
    #[error("Speech engine request failed: {0}")]
    RequestFailed(String),

    /// Invalid API key or authentication failed
    #[error("Invalid API key or authentication failed")]
    AuthenticationFailed,

    /// Network or HTTP transport error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
