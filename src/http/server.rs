//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the capture and health handlers
//! - Wire up middleware (tracing, request timeout, request ID)
//! - Serve on a bound listener until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::SidecarConfig;
use crate::health::health_handler;
use crate::http::capture::capture_handler;
use crate::http::request::{MakeRequestUuid, RequestIdExt};
use crate::storage::RequestStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RequestStore>,
    pub max_body_bytes: usize,
    pub body_read_timeout: Duration,
}

/// HTTP server for the sidecar.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over an already-connected store.
    pub fn new(config: &SidecarConfig, store: Arc<dyn RequestStore>) -> Self {
        let state = AppState {
            store,
            max_body_bytes: config.limits.max_body_bytes,
            body_read_timeout: config.limits.body_read_timeout(),
        };

        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &SidecarConfig, state: AppState) -> Router {
        Router::new()
            .route("/log", any(capture_handler))
            .route("/health", any(health_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request.request_id(),
                )
            }))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
