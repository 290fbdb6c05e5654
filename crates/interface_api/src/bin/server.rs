//! SWIFT Codes Registry - API Server Binary
//!
//! # Usage
//!
//! ```bash
//! # Run against PostgreSQL
//! API_DATABASE_URL=postgres://... cargo run --bin swift-codes-api
//!
//! # Run in memory, seeded from a file
//! API_STORAGE=memory API_SEED_FILE=data/swift_codes.tsv cargo run --bin swift-codes-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_LOG_LEVEL` - Log level or filter directive (default: info; `RUST_LOG` wins if set)
//! * `API_LOG_JSON` - Emit JSON logs (default: false)
//! * `API_STORAGE` - `postgres` or `memory` (default: postgres)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_DATABASE_MAX_CONNECTIONS` - Pool size (default: 10)
//! * `API_DATABASE_ACQUIRE_TIMEOUT_SECS` - Wait for a pooled connection (default: 5)
//! * `API_SEED_FILE` - Tab-separated seed file imported when the registry is empty

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_bank::{BankRegistry, BankStore, ImportOutcome, InMemoryBankStore, SeedImporter};
use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresBankStore};
use interface_api::config::{ApiConfig, StorageBackend};
use interface_api::create_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Invalid API_* configuration")?;

    init_tracing(&config.log_level, config.log_json);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        storage = ?config.storage,
        "Starting SWIFT codes API server"
    );

    let store = create_store(&config).await?;
    let registry = BankRegistry::new(store);

    if let Some(seed_file) = &config.seed_file {
        match SeedImporter::new().import_file(&registry, seed_file).await {
            Ok(ImportOutcome::Imported(summary)) => tracing::info!(
                headquarters = summary.headquarters,
                branches = summary.branches,
                skipped = summary.skipped,
                "Seed import complete"
            ),
            Ok(ImportOutcome::AlreadySeeded) => {
                tracing::info!("Registry already populated, seed file ignored")
            }
            Err(e) => return Err(e).context(format!("Failed to import seed file {}", seed_file)),
        }
    }

    let app = create_router(registry, config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Builds the configured storage backend, migrating the database first.
async fn create_store(config: &ApiConfig) -> anyhow::Result<Arc<dyn BankStore>> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            Ok(Arc::new(InMemoryBankStore::new()))
        }
        StorageBackend::Postgres => {
            let pool = create_pool(
                DatabaseConfig::new(&config.database_url)
                    .max_connections(config.database_max_connections)
                    .acquire_timeout(Duration::from_secs(config.database_acquire_timeout_secs)),
            )
            .await
            .context("Failed to connect to database")?;

            run_migrations(&pool).await?;

            Ok(Arc::new(PostgresBankStore::new(pool)))
        }
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests are allowed to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
