//! Binary entrypoint for the guessing game API server.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use fg_server::{ServerConfig, StoreBackend, DEFAULT_LOG_FILTER};

#[derive(Parser)]
#[command(name = "fg_server", about = "Daily football player guessing game API server")]
struct Cli {
    /// Config file (.yaml / .yml / .json). Falls back to FG_CONFIG_PATH.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen host
    #[arg(long)]
    host: Option<String>,

    /// Listen port
    #[arg(long)]
    port: Option<u16>,

    /// Player catalog (.json seed or .msgpack.lz4 cache)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Session store backend
    #[arg(long, value_enum)]
    store: Option<StoreBackend>,

    /// Snapshot file for the snapshot store
    #[arg(long)]
    snapshot_path: Option<PathBuf>,

    /// Attempts per daily game
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Salt for the daily answer pick
    #[arg(long)]
    daily_seed: Option<u64>,
}

impl Cli {
    fn into_config(self) -> Result<ServerConfig> {
        let mut config = ServerConfig::load(self.config.as_deref())?;

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(catalog) = self.catalog {
            config.catalog_path = Some(catalog);
        }
        if let Some(store) = self.store {
            config.store = store;
        }
        if let Some(snapshot_path) = self.snapshot_path {
            config.snapshot_path = snapshot_path;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        if let Some(daily_seed) = self.daily_seed {
            config.daily_seed = daily_seed;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Cli::parse().into_config()?;
    fg_server::run(config).await
}
