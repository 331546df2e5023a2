//! Storage gateway.
//!
//! # Data Flow
//! ```text
//! startup:
//!     PgStore::connect (retried by resilience::retries)
//!     → PgStore::ensure_schema (idempotent DDL)
//!     → Arc<dyn RequestStore> injected into the HTTP state
//!
//! per request:
//!     capture handler → RequestStore::insert → requests table
//!     health handler  → RequestStore::ping   → SELECT 1
//! ```
//!
//! # Design Decisions
//! - Handlers only see the `RequestStore` trait, so tests substitute an in-memory store
//! - Inserts are never retried; a failure belongs to the request that caused it
//! - The pool is the only shared resource; no application-level locking

pub mod postgres;
pub mod record;
pub mod schema;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use postgres::PgStore;
pub use record::RequestRecord;

/// Errors surfaced by the storage gateway.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid connection string: {0}")]
    InvalidConnectionString(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Append-only sink for captured requests.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Append one row. Errors are returned to the caller as-is, never retried.
    async fn insert(&self, record: &RequestRecord) -> StoreResult<()>;

    /// Liveness of the store. `false` on any connectivity failure.
    async fn ping(&self) -> bool;
}
