//! Estimator HTTP server binary
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 3000)
//! - `ALLOWED_ORIGINS`: Comma-separated CORS allow-list
//! - `ESTIMATOR_PUBLIC_KEY`: Optional shared secret for `X-Estimator-Key`
//! - `ESTIMATOR_RATES_PATH`: Optional JSON rate table
//! - `RUST_LOG`: Log filter (default: info)

use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use soft_pricing_estimator::config::Config;
use soft_pricing_estimator::pricing::RateTable;
use soft_pricing_estimator::{routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let rates = match &config.rates_path {
        Some(path) => {
            info!("Loading rate table from {}", path.display());
            RateTable::from_json_file(path)
                .with_context(|| format!("loading rate table from {}", path.display()))?
        }
        None => RateTable::default(),
    };

    info!(
        "Allowing {} origin(s), access key {}",
        config.allowed_origins.len(),
        if config.public_key.is_some() { "required" } else { "not required" }
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app = routes::app(AppState::new(config, rates));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Estimator listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
