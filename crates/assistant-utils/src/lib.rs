//! Shared utilities for the finance assistant
//!
//! Currently just the tracing/logging initialization used by the API
//! binary and by integration tests.

pub mod logging;

pub use logging::{init_tracing, init_tracing_with_default};
