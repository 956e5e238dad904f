//! Cache Builder Library
//!
//! 선수 카탈로그 캐시 생성: CSV / JSON seed → PlayerIndex → MessagePack → LZ4 압축 → SHA256 체크섬
//! The output is read back by `fg_core::data::load_catalog`.

pub mod player_csv;

use anyhow::{Context, Result};
use fg_core::data::{load_index_from_bytes, load_seed_json};
use fg_core::PlayerIndex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

pub use player_csv::{build_player_cache, parse_csv_to_records, ParseStats};

/// 캐시 메타데이터
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    /// 스키마 버전 (예: "v1")
    pub schema_version: String,
    /// SHA256 체크섬 (hex 문자열)
    pub checksum: String,
    /// 생성 시각 (RFC3339 형식)
    pub created_at: String,
    /// MessagePack 크기 (bytes)
    pub original_size: u64,
    /// 압축 후 크기 (bytes)
    pub compressed_size: u64,
    /// 압축률 (압축 후 / 원본)
    pub compression_ratio: f64,
    /// 선수 수
    pub player_count: u32,
}

/// JSON seed 파일을 MessagePack+LZ4 캐시로 변환
///
/// # Arguments
///
/// * `input_json` - PlayerRecord 배열 JSON 파일
/// * `output_msgpack_lz4` - 출력 캐시 파일 경로
/// * `schema_version` - 스키마 버전 문자열
pub fn build_seed_cache(
    input_json: &Path,
    output_msgpack_lz4: &Path,
    schema_version: &str,
) -> Result<CacheMetadata> {
    let json_str = fs::read_to_string(input_json)
        .with_context(|| format!("Failed to read JSON file: {}", input_json.display()))?;

    let mut index = load_seed_json(&json_str)
        .with_context(|| format!("Failed to parse seed JSON: {}", input_json.display()))?;
    index.schema_version = schema_version.to_string();

    write_index_cache(&index, output_msgpack_lz4)
}

/// PlayerIndex → MessagePack → LZ4 → file, returning metadata for the written bytes.
pub fn write_index_cache(index: &PlayerIndex, output_msgpack_lz4: &Path) -> Result<CacheMetadata> {
    let msgpack_bytes =
        rmp_serde::to_vec(index).context("Failed to serialize PlayerIndex to MessagePack")?;
    let original_size = msgpack_bytes.len() as u64;

    let compressed = lz4_flex::compress_prepend_size(&msgpack_bytes);
    let compressed_size = compressed.len() as u64;

    let checksum = format!("{:x}", Sha256::digest(&compressed));

    if let Some(parent) = output_msgpack_lz4.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    fs::write(output_msgpack_lz4, &compressed).with_context(|| {
        format!(
            "Failed to write output file: {}",
            output_msgpack_lz4.display()
        )
    })?;

    Ok(CacheMetadata {
        schema_version: index.schema_version.clone(),
        checksum,
        created_at: chrono::Utc::now().to_rfc3339(),
        original_size,
        compressed_size,
        compression_ratio: compressed_size as f64 / original_size.max(1) as f64,
        player_count: index.count,
    })
}

/// 캐시 파일의 무결성 검증
///
/// # Returns
///
/// 체크섬 일치 여부
pub fn verify_cache(cache_file: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes = fs::read(cache_file)
        .with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;

    let actual = format!("{:x}", Sha256::digest(&bytes));
    Ok(actual.eq_ignore_ascii_case(expected_checksum.trim()))
}

/// Read a cache file back through the same decoder the server uses.
pub fn load_player_cache(cache_file: &Path) -> Result<PlayerIndex> {
    let bytes = fs::read(cache_file)
        .with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;

    load_index_from_bytes(&bytes)
        .with_context(|| format!("Failed to decode player cache: {}", cache_file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fg_core::data::EMBEDDED_SEED_JSON;
    use fg_core::PlayerCatalog;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_build_and_verify_seed_cache() -> Result<()> {
        let mut seed = NamedTempFile::new()?;
        seed.write_all(EMBEDDED_SEED_JSON.as_bytes())?;

        let dir = TempDir::new()?;
        let output = dir.path().join("exports/cache_players.v1.msgpack.lz4");

        let metadata = build_seed_cache(seed.path(), &output, "v1")?;

        assert_eq!(metadata.schema_version, "v1");
        assert!(metadata.compressed_size > 0);
        assert!(verify_cache(&output, &metadata.checksum)?);
        assert!(!verify_cache(&output, "deadbeef")?);

        let index = load_player_cache(&output)?;
        assert_eq!(index.count, metadata.player_count);

        // same players as the embedded seed, classification included
        let cached = PlayerCatalog::from_index(index);
        let embedded = fg_core::data::embedded_catalog()?;
        assert_eq!(cached.len(), embedded.len());
        for player in embedded.iter() {
            assert_eq!(cached.get(player.id), Some(player));
        }

        Ok(())
    }

    #[test]
    fn test_seed_cache_rejects_empty_seed() -> Result<()> {
        let mut seed = NamedTempFile::new()?;
        seed.write_all(b"[]")?;
        let dir = TempDir::new()?;

        assert!(build_seed_cache(seed.path(), &dir.path().join("out.lz4"), "v1").is_err());
        Ok(())
    }

    #[test]
    fn test_load_rejects_garbage() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(&[0xc1, 0x00])?;

        assert!(load_player_cache(file.path()).is_err());
        Ok(())
    }
}
