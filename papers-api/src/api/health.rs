//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::buildinfo::{SERVICE_NAME, VERSION};
use crate::AppState;

/// Health check response
///
/// Reports cache state without triggering a catalog load.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub papers_cached: usize,
    pub loaded_at: Option<String>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = state.store.status().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        module: SERVICE_NAME.to_string(),
        version: VERSION.to_string(),
        papers_cached: cache.papers_cached,
        loaded_at: cache.loaded_at.map(|t| t.to_rfc3339()),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
