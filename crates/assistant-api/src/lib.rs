//! HTTP facade for the finance assistant
//!
//! Routes browser requests to the market, text-generation, and speech
//! crates:
//!
//! - `GET /` - health check
//! - `GET /summary?ticker=` - market brief plus generated summary
//! - `GET /prompt?prompt=` - free-form prompt to the text backend
//! - `POST /transcribe` - multipart audio upload to transcription
//! - `POST /speak?text=` - speech synthesis, returns mp3 bytes
//!
//! Handlers never bubble faults to the transport layer: failures come
//! back as `{"error": ...}` JSON payloads, matching what the frontend
//! already expects.

pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
