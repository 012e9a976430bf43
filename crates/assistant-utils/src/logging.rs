//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with the standard server defaults
///
/// `RUST_LOG` wins when set; otherwise the assistant crates log at
/// `info` and everything else at `warn` so provider client noise stays
/// out of the way.
pub fn init_tracing() {
    init_tracing_with_default("warn,assistant_api=info,assistant_market=info,assistant_llm=info,assistant_speech=info");
}

/// Initialize tracing with a caller-provided default directive
///
/// The directive is only used when `RUST_LOG` is unset.
pub fn init_tracing_with_default(directive: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
