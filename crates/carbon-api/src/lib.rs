//! Carbon API /v1: REST endpoints around the calculator
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod session;

use axum::{
    routing::{get, post},
    Router,
};
use carbon_core::{Clock, EmissionEstimator, FactorTable};
use carbon_out::ContentSelector;
use config::ApiConfig;
use metrics::Metrics;
use session::PurchaseSession;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<PurchaseSession>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Load factor table and templates named by the config, falling back to built-ins
    pub fn from_config(config: &ApiConfig, clock: Arc<dyn Clock>) -> anyhow::Result<Self> {
        let table = match &config.factors_path {
            Some(path) => {
                tracing::info!(path = %path, "loading factor table");
                FactorTable::load(path)?
            }
            None => FactorTable::default(),
        };
        let selector = match &config.templates_path {
            Some(path) => {
                tracing::info!(path = %path, "loading commentary templates");
                ContentSelector::load(path)?
            }
            None => ContentSelector::default(),
        };

        let session = PurchaseSession::new(
            EmissionEstimator::new(table),
            selector,
            clock,
            config.history_limit,
        );
        Ok(Self {
            session: Arc::new(session),
            metrics: Arc::new(Metrics::new()?),
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/report", post(handlers::report))
        .route("/v1/history", get(handlers::history))
        .route("/v1/factors", get(handlers::factors))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(config: &ApiConfig, state: AppState) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&config.addr).await?;

    tracing::info!("Carbon API listening on {}", config.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
