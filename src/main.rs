//! Request-logging sidecar.
//!
//! ```text
//!     upstream proxy                 ┌──────────────────────────────┐
//!     (X-Original-* headers)         │        request-sidecar        │
//!     ───────────────── /log ───────▶│  http::capture ──┐           │
//!                                    │                  ▼           │      ┌──────────┐
//!     orchestrator                   │            storage::PgStore ─┼─────▶│ postgres │
//!     ───────────────── /health ────▶│  health ─────────┘           │      └──────────┘
//!                                    └──────────────────────────────┘
//! ```
//!
//! Startup order: config → logging → store connect (retried) → schema
//! bootstrap → listener. Any failure before the listener is bound exits
//! non-zero.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use request_sidecar::config::{load_config, SidecarConfig};
use request_sidecar::lifecycle::{signals, startup, Shutdown};
use request_sidecar::observability::{logging, metrics};
use request_sidecar::HttpServer;

#[derive(Parser)]
#[command(name = "request-sidecar")]
#[command(about = "Captures forwarded request metadata into PostgreSQL", long_about = None)]
struct Cli {
    /// Optional TOML config file. DATABASE_URL and PORT override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("request-sidecar: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(&config.observability.log_level);

    match run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: SidecarConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("request-sidecar v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        max_attempts = config.database.max_attempts,
        max_connections = config.database.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = startup::open_store(&config.database).await?;
    let listener = startup::bind_listener(&config.listener).await?;

    tracing::info!(
        address = %listener.local_addr()?,
        "Analytics service listening"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    let server = HttpServer::new(&config, Arc::new(store.clone()));
    server.run(listener, server_shutdown).await?;

    store.close().await;
    Ok(())
}
