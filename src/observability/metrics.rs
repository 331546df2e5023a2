//! Metrics collection and exposition.
//!
//! # Metrics
//! - `sidecar_captures_total` (counter): captures by outcome (`stored`, `failed`)
//! - `sidecar_capture_duration_seconds` (histogram): capture latency including the insert
//! - `sidecar_health_checks_total` (counter): health checks by status (`ok`, `unavailable`)
//! - `sidecar_store_connect_attempts_total` (counter): startup connection attempts
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_capture(stored: bool, start: Instant) {
    let outcome = if stored { "stored" } else { "failed" };
    metrics::counter!("sidecar_captures_total", "outcome" => outcome).increment(1);
    metrics::histogram!("sidecar_capture_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_health(ok: bool) {
    let status = if ok { "ok" } else { "unavailable" };
    metrics::counter!("sidecar_health_checks_total", "status" => status).increment(1);
}

pub fn record_connect_attempt() {
    metrics::counter!("sidecar_store_connect_attempts_total").increment(1);
}
