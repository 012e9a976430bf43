//! Speech services for the finance assistant
//!
//! Two small HTTP clients:
//!
//! - [`TranscriptionClient`]: posts uploaded audio to a local
//!   Whisper-compatible inference server and returns the transcript
//! - [`SpeechClient`]: calls an OpenAI-compatible `audio/speech`
//!   endpoint and returns the synthesized mp3 bytes
//!
//! Neither client retries; faults surface as typed [`SpeechError`]
//! values for the facade to shape.

pub mod error;
pub mod speak;
pub mod transcribe;

// Re-export main types
pub use error::{Result, SpeechError};
pub use speak::{SpeechClient, TtsConfig};
pub use transcribe::{TranscriptionClient, WhisperConfig};
