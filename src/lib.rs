//! Request-logging sidecar library.
//!
//! Receives forwarded request metadata from an upstream proxy on `/log` and
//! appends it to a PostgreSQL `requests` table; `/health` reports store
//! reachability.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod storage;

pub use config::schema::SidecarConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use storage::{PgStore, RequestRecord, RequestStore, StoreError};
