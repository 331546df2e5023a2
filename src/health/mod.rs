//! Health endpoint (`/health`).
//!
//! Reports store reachability only. A 503 here means "store down", which
//! orchestration can tell apart from the 500 of a single failed capture.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::http::response;
use crate::http::server::AppState;
use crate::observability::metrics;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Ping the store on every call; no cached state, so recovery shows up on the next check.
pub async fn health_handler(State(state): State<AppState>) -> Response {
    if state.store.ping().await {
        metrics::record_health(true);
        (StatusCode::OK, Json(HealthStatus { status: "ok" })).into_response()
    } else {
        tracing::warn!("Health check failed: store unreachable");
        metrics::record_health(false);
        response::database_unavailable()
    }
}
