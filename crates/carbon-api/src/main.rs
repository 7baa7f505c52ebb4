//! Binary entrypoint for the Carbon API server.
use carbon_api::{config::ApiConfig, run, AppState};
use carbon_core::SystemClock;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ApiConfig::from_env()?;
    let state = AppState::from_config(&config, Arc::new(SystemClock))?;
    run(&config, state).await
}
