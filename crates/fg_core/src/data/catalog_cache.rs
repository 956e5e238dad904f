//! Catalog loader
//!
//! Source artifact: `data/exports/cache_players.v1.msgpack.lz4` (built by `cache_builder`)
//! Format: LZ4 (size-prepended) + MessagePack(serde) of `PlayerIndex`.
//! A `.json` path is read as a seed file instead.

use lz4_flex::decompress_size_prepended;
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::catalog::{PlayerCatalog, PlayerIndex};
use crate::error::CatalogError;

/// Env var for overriding the catalog path.
pub const PLAYER_CACHE_ENV: &str = "FG_PLAYER_CACHE_PATH";

/// Configured path first, then `FG_PLAYER_CACHE_PATH`. `None` means "use the embedded seed".
pub fn resolve_catalog_path(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        return Some(path.to_path_buf());
    }
    env::var(PLAYER_CACHE_ENV)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
        .map(PathBuf::from)
}

pub fn load_index_from_bytes(bytes: &[u8]) -> Result<PlayerIndex, CatalogError> {
    // Plain MessagePack first, LZ4-wrapped otherwise.
    let index = match rmp_serde::from_slice::<PlayerIndex>(bytes) {
        Ok(index) => index,
        Err(_) => {
            let msgpack_bytes = decompress_size_prepended(bytes)
                .map_err(|e| CatalogError::Decompression(e.to_string()))?;
            rmp_serde::from_slice::<PlayerIndex>(&msgpack_bytes)?
        }
    };

    index.validate()?;
    Ok(index)
}

pub fn load_index_from_path(path: &Path) -> Result<PlayerIndex, CatalogError> {
    let bytes = std::fs::read(path)?;
    load_index_from_bytes(&bytes)
}

/// Load a catalog from a cache file or a JSON seed, or the embedded seed when `path` is `None`.
pub fn load_catalog(path: Option<&Path>) -> Result<PlayerCatalog, CatalogError> {
    let index = match path {
        Some(path) if path.extension().is_some_and(|ext| ext == "json") => {
            let json = std::fs::read_to_string(path)?;
            super::seed::load_seed_json(&json)?
        }
        Some(path) => load_index_from_path(path)?,
        None => super::seed::load_seed_json(super::seed::EMBEDDED_SEED_JSON)?,
    };

    if index.is_empty() {
        return Err(CatalogError::Empty);
    }

    let source = path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "embedded seed".to_string());
    info!(
        players = index.len(),
        schema = %index.schema_version,
        "Loaded player catalog from {source}"
    );

    Ok(PlayerCatalog::from_index(index))
}
