//! fg_server - REST API for the daily football player guessing game.
//!
//! Wires the catalog, session store and game rules from `ServerConfig`
//! into a `GameService` and serves it over axum.

pub mod config;
pub mod error;
pub mod http;

use anyhow::{Context, Result};
use fg_core::data::{load_catalog, resolve_catalog_path};
use fg_core::{DailySchedule, GameService, GameStore, MemoryStore, SnapshotStore};
use std::sync::Arc;
use tracing::info;

pub use config::{ConfigError, ServerConfig, StoreBackend};

/// Default `RUST_LOG` directives.
pub const DEFAULT_LOG_FILTER: &str = "fg_server=info,fg_core=info,tower_http=info";

/// Build the game service described by `config`.
pub fn build_service(config: &ServerConfig) -> Result<GameService> {
    config.validate()?;

    let catalog_path = resolve_catalog_path(config.catalog_path.as_deref());
    let catalog = load_catalog(catalog_path.as_deref()).with_context(|| match &catalog_path {
        Some(path) => format!("Failed to load player catalog from {}", path.display()),
        None => "Failed to load embedded player catalog".to_string(),
    })?;

    let store: Arc<dyn GameStore> = match config.store {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Snapshot => Arc::new(
            SnapshotStore::open(&config.snapshot_path).with_context(|| {
                format!(
                    "Failed to open session snapshot {}",
                    config.snapshot_path.display()
                )
            })?,
        ),
    };
    info!(
        players = catalog.len(),
        store = ?config.store,
        max_attempts = config.max_attempts,
        "Game service ready"
    );

    Ok(GameService::new(
        Arc::new(catalog),
        store,
        config.rules(),
        DailySchedule::new(config.daily_seed),
    ))
}

/// Serve the API until Ctrl+C.
pub async fn run(config: ServerConfig) -> Result<()> {
    let service = Arc::new(build_service(&config)?);
    let app = http::router(service);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("fg_server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("fg_server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}
