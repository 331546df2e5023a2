//! Response helpers.
//!
//! Failures carry a fixed plain-text body; the underlying cause is logged
//! server-side and never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub const INTERNAL_ERROR_BODY: &str = "Internal error";
pub const DATABASE_UNAVAILABLE_BODY: &str = "Database unavailable";

/// `text/plain` response with a static body.
pub fn plain_text(status: StatusCode, body: &'static str) -> Response {
    (status, body).into_response()
}

pub fn internal_error() -> Response {
    plain_text(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY)
}

pub fn database_unavailable() -> Response {
    plain_text(StatusCode::SERVICE_UNAVAILABLE, DATABASE_UNAVAILABLE_BODY)
}
