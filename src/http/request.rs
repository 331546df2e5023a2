//! Request handling: record extraction and request IDs.
//!
//! # Responsibilities
//! - Map forwarded headers onto a [`RequestRecord`]
//! - Read the capture body best-effort
//! - Generate `x-request-id` for requests that arrive without one
//!
//! # Design Decisions
//! - Missing headers become empty strings, never NULL; only the device id is optional
//! - Non-UTF-8 header values and bodies are decoded lossily rather than rejected
//! - A body that cannot be read, is too large or stalls past its deadline is
//!   stored as empty; the request still succeeds

use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Request};
use chrono::{DateTime, Utc};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::storage::RequestRecord;

pub const X_REQUEST_ID: &str = "x-request-id";
pub const X_ORIGINAL_METHOD: &str = "x-original-method";
pub const X_ORIGINAL_URI: &str = "x-original-uri";
pub const X_ORIGINAL_HOST: &str = "x-original-host";
pub const X_REAL_IP: &str = "x-real-ip";
pub const X_DEVICE_ID: &str = "x-device-id";
pub const DEVICE_ID: &str = "device-id";

/// Build the record for one capture call.
pub fn record_from_headers(
    headers: &HeaderMap,
    body: String,
    received_at: DateTime<Utc>,
) -> RequestRecord {
    RequestRecord {
        method: header_or_empty(headers, X_ORIGINAL_METHOD),
        uri: header_or_empty(headers, X_ORIGINAL_URI),
        host: header_or_empty(headers, X_ORIGINAL_HOST),
        ip: header_or_empty(headers, X_REAL_IP),
        device_id: device_id(headers),
        user_agent: header_or_empty(headers, axum::http::header::USER_AGENT.as_str()),
        body,
        received_at,
    }
}

/// `X-Device-Id`, falling back to `Device-Id`; the first non-empty value wins.
pub fn device_id(headers: &HeaderMap) -> Option<String> {
    [X_DEVICE_ID, DEVICE_ID]
        .into_iter()
        .map(|name| header_or_empty(headers, name))
        .find(|value| !value.is_empty())
}

fn header_or_empty(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default()
}

/// Read the whole body as text, up to `limit` bytes and within `deadline`.
pub async fn read_body_lossy(body: Body, limit: usize, deadline: Duration) -> String {
    match tokio::time::timeout(deadline, axum::body::to_bytes(body, limit)).await {
        Ok(Ok(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, limit, "Unreadable capture body, storing empty body");
            String::new()
        }
        Err(_) => {
            tracing::warn!(deadline = ?deadline, "Capture body stalled, storing empty body");
            String::new()
        }
    }
}

/// Extension trait for reading the request ID off any request.
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl RequestIdExt for HeaderMap {
    fn request_id(&self) -> &str {
        self.get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers().request_id()
    }
}

/// UUID v4 request IDs for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}
