//! PostgreSQL implementation of the storage gateway.
//!
//! # Responsibilities
//! - Open and verify a pooled connection (`PgPool`)
//! - Run the idempotent schema bootstrap
//! - Append request rows and answer health pings
//!
//! The connection string carries credentials, so only host and database
//! name ever reach the logs.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::resilience::timeouts::with_deadline;
use crate::storage::schema::{BOOTSTRAP_SQL, INSERT_SQL, PING_SQL};
use crate::storage::{RequestRecord, RequestStore, StoreError, StoreResult};

/// Pooled handle to the `requests` table.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgStore {
    /// Open a pool and verify it with a ping. One attempt; the caller retries.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let options = connect_options(config)?;

        tracing::debug!(
            host = options.get_host(),
            database = options.get_database().unwrap_or_default(),
            max_connections = config.max_connections,
            "Opening store pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_with(options)
            .await?;

        let store = Self::from_pool(pool, config.query_timeout());
        store.check().await?;
        Ok(store)
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool, query_timeout: Duration) -> Self {
        Self { pool, query_timeout }
    }

    /// Create the table and indexes if absent. No-op against an existing schema.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::raw_sql(BOOTSTRAP_SQL).execute(&self.pool).await?;
        tracing::info!("Schema bootstrap complete");
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn check(&self) -> StoreResult<()> {
        with_deadline(
            self.query_timeout,
            sqlx::query(PING_SQL).execute(&self.pool),
        )
        .await
        .map(|_| ())
    }
}

impl std::fmt::Debug for PgStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgStore")
            .field("pool_size", &self.pool.size())
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}

#[async_trait]
impl RequestStore for PgStore {
    async fn insert(&self, record: &RequestRecord) -> StoreResult<()> {
        let query = sqlx::query(INSERT_SQL)
            .bind(record.method.as_str())
            .bind(record.uri.as_str())
            .bind(record.host.as_str())
            .bind(record.ip.as_str())
            .bind(record.device_id.as_deref())
            .bind(record.user_agent.as_str())
            .bind(record.body.as_str())
            .bind(record.received_at)
            .execute(&self.pool);

        with_deadline(self.query_timeout, query).await?;
        Ok(())
    }

    async fn ping(&self) -> bool {
        match self.check().await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "Store ping failed");
                false
            }
        }
    }
}

/// Parse the connection string and apply session-level settings.
fn connect_options(config: &DatabaseConfig) -> StoreResult<PgConnectOptions> {
    let mut options = PgConnectOptions::from_str(&config.url)
        .map_err(|e| StoreError::InvalidConnectionString(redact(&e)))?
        .application_name(env!("CARGO_PKG_NAME"));

    if config.statement_timeout_ms > 0 {
        options = options.options([(
            "statement_timeout",
            format!("{}ms", config.statement_timeout_ms),
        )]);
    }

    Ok(options)
}

// sqlx parse errors can echo the URL back; keep only the error kind.
fn redact(e: &sqlx::Error) -> String {
    match e {
        sqlx::Error::Configuration(_) => "malformed postgres connection string".to_string(),
        other => other.to_string(),
    }
}
