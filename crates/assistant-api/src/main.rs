//! Finance assistant API server
//!
//! Binds the axum router over the market, text-generation, and speech
//! backends. All configuration comes from environment variables (a
//! local `.env` file is honored in development).

use std::net::SocketAddr;

use tracing::info;

use assistant_api::{AppState, router};

/// Server bind settings
struct ServerConfig {
    host: String,
    port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Load bind settings from `API_HOST` / `API_PORT`
    fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("API_HOST").unwrap_or(defaults.host);
        let port = std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        Self { host, port }
    }

    fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine; containers inject real environment.
    dotenvy::dotenv().ok();
    assistant_utils::init_tracing();

    let config = ServerConfig::from_env();
    let state = AppState::from_env()?;
    let app = router(state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("finance assistant API listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
