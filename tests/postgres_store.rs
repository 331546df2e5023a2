//! Storage gateway against a live PostgreSQL.
//!
//! Run with `DATABASE_URL=postgres://... cargo test --features pg-tests`.

#![cfg(feature = "pg-tests")]

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tower::ServiceExt;
use uuid::Uuid;

use request_sidecar::config::DatabaseConfig;
use request_sidecar::lifecycle::{startup, StartupError};
use request_sidecar::storage::schema::INDEX_NAMES;
use request_sidecar::{HttpServer, PgStore, RequestRecord, RequestStore, SidecarConfig};

fn database_config() -> DatabaseConfig {
    DatabaseConfig {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for pg-tests"),
        max_attempts: 5,
        attempt_interval_ms: 200,
        ..DatabaseConfig::default()
    }
}

async fn store() -> PgStore {
    startup::open_store(&database_config()).await.expect("store should be reachable")
}

type Row = (
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    DateTime<Utc>,
    DateTime<Utc>,
);

async fn fetch_by_uri(store: &PgStore, uri: &str) -> Vec<Row> {
    sqlx::query_as(
        "SELECT method, uri, host, ip, device_id, user_agent, body, received_at, created_at \
         FROM requests WHERE uri = $1 ORDER BY id",
    )
    .bind(uri)
    .fetch_all(store.pool())
    .await
    .unwrap()
}

#[tokio::test]
async fn schema_bootstrap_is_idempotent() {
    let store = store().await;
    for _ in 0..3 {
        store.ensure_schema().await.unwrap();
    }

    let tables: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM information_schema.tables \
         WHERE table_schema = current_schema() AND table_name = 'requests'",
    )
    .fetch_one(store.pool())
    .await
    .unwrap();
    assert_eq!(tables, 1);

    for index in INDEX_NAMES {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM pg_indexes \
             WHERE schemaname = current_schema() AND tablename = 'requests' AND indexname = $1",
        )
        .bind(index)
        .fetch_one(store.pool())
        .await
        .unwrap();
        assert_eq!(count, 1, "index {} should exist exactly once", index);
    }
}

#[tokio::test]
async fn insert_persists_record_with_store_assigned_created_at() {
    let store = store().await;
    let uri = format!("/pg-test/{}", Uuid::new_v4());
    let received_at = Utc::now() - chrono::Duration::seconds(5);

    let record = RequestRecord {
        method: "PATCH".to_string(),
        uri: uri.clone(),
        host: "pg.example.com".to_string(),
        ip: String::new(),
        device_id: None,
        user_agent: String::new(),
        body: String::new(),
        received_at,
    };
    store.insert(&record).await.unwrap();

    let rows = fetch_by_uri(&store, &uri).await;
    assert_eq!(rows.len(), 1);
    let (method, _, host, ip, device_id, user_agent, body, stored_received, created_at) =
        rows[0].clone();
    assert_eq!(method, "PATCH");
    assert_eq!(host, "pg.example.com");
    assert_eq!(ip.as_deref(), Some(""));
    assert_eq!(device_id, None);
    assert_eq!(user_agent.as_deref(), Some(""));
    assert_eq!(body.as_deref(), Some(""));
    assert_eq!(stored_received.timestamp_micros(), received_at.timestamp_micros());
    assert!(created_at > stored_received);
}

#[tokio::test]
async fn capture_route_writes_one_row() {
    let store = store().await;
    let uri = format!("/pg-route/{}", Uuid::new_v4());
    let app = HttpServer::new(&SidecarConfig::default(), Arc::new(store.clone())).router();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/log")
        .header("X-Original-URI", uri.as_str())
        .header("Device-Id", "legacy-device")
        .body(axum::body::Body::from("hello"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), 200);

    let rows = fetch_by_uri(&store, &uri).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].4.as_deref(), Some("legacy-device"));
    assert_eq!(rows[0].6.as_deref(), Some("hello"));
}

#[tokio::test]
async fn ping_fails_after_pool_closed() {
    let store = store().await;
    assert!(store.ping().await);

    store.close().await;
    let ping = tokio::time::timeout(Duration::from_secs(10), store.ping()).await.unwrap();
    assert!(!ping);
}

#[tokio::test]
async fn bootstrap_without_target_schema_is_fatal() {
    // A search_path naming a missing schema leaves CREATE TABLE nowhere to create in.
    let options = PgConnectOptions::from_str(&database_config().url)
        .unwrap()
        .options([("search_path", "sidecar_schema_that_does_not_exist")]);
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    let store = PgStore::from_pool(pool, Duration::from_secs(5));

    let err = startup::bootstrap_schema(&store).await.unwrap_err();
    assert!(matches!(err, StartupError::SchemaBootstrap(_)));
    assert!(err.to_string().starts_with("Failed to initialize database"));
}
