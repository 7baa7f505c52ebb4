//! API Handlers
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use carbon_core::{CarbonError, FactorTable, PurchaseDraft, CARBON_VERSION};
use serde_json::{json, Value};

use crate::session::PurchaseReport;
use crate::AppState;

pub async fn report(
    State(state): State<AppState>,
    body: Result<Json<PurchaseDraft>, JsonRejection>,
) -> Result<Json<PurchaseReport>, (StatusCode, Json<Value>)> {
    let Json(draft) = body.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "malformed purchase body");
        rejected(&state, CarbonError::validation("body", rejection.body_text()))
    })?;

    match state.session.submit(&draft) {
        Ok(report) => {
            state.metrics.reports_total.inc();
            state.metrics.report_kg.observe(report.kg_after_offset);
            Ok(Json(report))
        }
        Err(e) => Err(rejected(&state, e)),
    }
}

fn rejected(state: &AppState, error: CarbonError) -> (StatusCode, Json<Value>) {
    state.metrics.validation_failures_total.inc();
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": error.to_string() })),
    )
}

pub async fn history(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let entries = state.session.history();
    let lines: Vec<String> = entries.iter().map(|e| e.summary()).collect();
    (
        StatusCode::OK,
        Json(json!({ "entries": entries, "lines": lines })),
    )
}

pub async fn factors(State(state): State<AppState>) -> Json<FactorTable> {
    Json(state.session.estimator().table().clone())
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "version": CARBON_VERSION })))
}

pub async fn metrics(State(state): State<AppState>) -> (StatusCode, String) {
    match state.metrics.encode() {
        Ok(text) => (StatusCode::OK, text),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
