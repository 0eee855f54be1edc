//! Gateway shell routes
//!
//! The routes the gateway itself owns, next to the discovered endpoints:
//!
//! - `/endpoints`: the aggregated catalog the playground renders
//! - `/set`: branding/display settings
//! - `/health`: liveness and uptime
//! - the 404 fallback behind the static frontend

use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::sync::Arc;

/// Catalog read endpoint.
///
/// The response value is computed once at startup; every read serves the
/// same bytes.
pub async fn catalog(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog_response.clone())
}

/// Branding/settings read endpoint
pub async fn settings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.settings_response.clone())
}

/// Health check endpoint (liveness)
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "restdock",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": state.started.elapsed().as_secs(),
    }))
}

/// 404 fallback for anything neither a discovered endpoint nor a frontend
/// asset
pub async fn not_found(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
) -> Response {
    tracing::info!(method = %method, path = %uri.path(), "404");
    state.error_pages.not_found()
}
