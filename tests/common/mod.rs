//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use tokio::net::TcpListener;

use request_sidecar::storage::{RequestRecord, RequestStore, StoreError, StoreResult};
use request_sidecar::{HttpServer, SidecarConfig, Shutdown};

/// In-memory `RequestStore` with switchable connectivity.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<RequestRecord>>,
    down: AtomicBool,
    /// Fail every n-th insert (1-based); 0 never fails.
    fail_every: AtomicUsize,
    inserts: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn fail_every(&self, n: usize) {
        self.fail_every.store(n, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<RequestRecord> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn insert(&self, record: &RequestRecord) -> StoreResult<()> {
        let n = self.inserts.fetch_add(1, Ordering::SeqCst) + 1;
        let every = self.fail_every.load(Ordering::SeqCst);

        if self.down.load(Ordering::SeqCst) || (every > 0 && n % every == 0) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }

        // Yield so concurrent captures actually interleave.
        tokio::task::yield_now().await;
        self.rows.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn ping(&self) -> bool {
        !self.down.load(Ordering::SeqCst)
    }
}

/// Fully layered router over `store`, with default config.
pub fn app(store: Arc<MemoryStore>) -> Router {
    HttpServer::new(&SidecarConfig::default(), store).router()
}

/// Capture request carrying the given headers and body.
pub fn capture_request(headers: &[(&str, &str)], body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/log");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(body.into()).unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Serve `store` on an ephemeral port; trigger the returned `Shutdown` to stop.
pub async fn start_server(store: Arc<MemoryStore>) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(&SidecarConfig::default(), store);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Listener is already bound; give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}
