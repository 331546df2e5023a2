//! Capture endpoint (`/log`).

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::http::request::{read_body_lossy, record_from_headers, RequestIdExt};
use crate::http::response;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Persist one forwarded request. Any method is accepted.
///
/// At-most-once: a failed insert is logged and answered with a 500, and the
/// payload is dropped.
pub async fn capture_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let received_at = Utc::now();

    let (parts, body) = request.into_parts();
    let request_id = parts.headers.request_id().to_string();
    let body = read_body_lossy(body, state.max_body_bytes, state.body_read_timeout).await;
    let record = record_from_headers(&parts.headers, body, received_at);

    match state.store.insert(&record).await {
        Ok(()) => {
            tracing::debug!(
                request_id = %request_id,
                method = %record.method,
                host = %record.host,
                uri = %record.uri,
                "Request captured"
            );
            metrics::record_capture(true, start_time);
            StatusCode::OK.into_response()
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                host = %record.host,
                uri = %record.uri,
                error = %e,
                "Error inserting request"
            );
            metrics::record_capture(false, start_time);
            response::internal_error()
        }
    }
}
