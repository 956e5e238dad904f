//! Server configuration
//!
//! 설정 파일(YAML/JSON) → CLI 플래그 순으로 덮어쓴다.
//!
//! ## Environment Variables
//!
//! - `FG_CONFIG_PATH`: config file used when `--config` is not given
//! - `FG_PLAYER_CACHE_PATH`: catalog path when none is configured

use fg_core::GameRules;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "FG_CONFIG_PATH";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format (expected .yaml, .yml or .json): {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Session storage backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Lost on restart
    #[default]
    Memory,
    /// MessagePack + LZ4 snapshot file
    Snapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_attempts: u32,
    pub search_limit: usize,
    pub min_query_len: usize,
    /// `.json` seed or MessagePack/LZ4 cache; `None` falls back to the env var, then the embedded seed
    pub catalog_path: Option<PathBuf>,
    pub store: StoreBackend,
    pub snapshot_path: PathBuf,
    /// Salt for the daily answer pick
    pub daily_seed: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_attempts: 6,
            search_limit: 10,
            min_query_len: 3,
            catalog_path: None,
            store: StoreBackend::Memory,
            snapshot_path: PathBuf::from("data/sessions.msgpack.lz4"),
            daily_seed: 0,
        }
    }
}

impl ServerConfig {
    /// Parse a config file, format picked by extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(serde_yaml::from_str(&raw)?),
            Some("json") => Ok(serde_json::from_str(&raw)?),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Explicit path first, then `FG_CONFIG_PATH`, then defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_path(path);
        }

        match env::var(CONFIG_PATH_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::from_path(Path::new(raw.trim())),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".into()));
        }
        if self.search_limit == 0 {
            return Err(ConfigError::Invalid("search_limit must be at least 1".into()));
        }
        if self.min_query_len == 0 {
            return Err(ConfigError::Invalid("min_query_len must be at least 1".into()));
        }
        if self.store == StoreBackend::Snapshot && self.snapshot_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "snapshot_path is required for the snapshot store".into(),
            ));
        }
        Ok(())
    }

    pub fn rules(&self) -> GameRules {
        GameRules {
            max_attempts: self.max_attempts,
            search_limit: self.search_limit,
            min_query_len: self.min_query_len,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
