//! Player CSV → binary cache pipeline
//!
//! CSV → Vec<PlayerRecord> → PlayerIndex (ids 1..=n in row order) → MessagePack → LZ4
//!
//! Expected header:
//! `name,nationality,position,club,league,age,height,dominant_foot,career_start,career_end,
//! image_url,club_image_url,nationality_image_url`
//!
//! `career_end` and the three asset columns may be empty.

use anyhow::{bail, Context, Result};
use fg_core::{DominantFoot, PlayerIndex, PlayerRecord};
use serde::Deserialize;
use std::path::Path;

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
}

/// One CSV row as written by the data team.
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    nationality: String,
    position: String,
    club: String,
    league: String,
    age: u8,
    height: u16,
    dominant_foot: String,
    career_start: u16,
    career_end: Option<u16>,
    image_url: Option<String>,
    club_image_url: Option<String>,
    nationality_image_url: Option<String>,
}

impl CsvRow {
    fn into_record(self) -> Result<PlayerRecord, String> {
        if self.name.is_empty() {
            return Err("empty name".to_string());
        }
        let dominant_foot: DominantFoot = self.dominant_foot.parse()?;

        Ok(PlayerRecord {
            name: self.name,
            nationality: self.nationality,
            position: self.position,
            club: self.club,
            league: self.league,
            age: self.age,
            height: self.height,
            dominant_foot,
            is_active: self.career_end.is_none(),
            career_start: self.career_start,
            career_end: self.career_end,
            image_url: self.image_url,
            club_image_url: self.club_image_url,
            nationality_image_url: self.nationality_image_url,
        })
    }
}

/// Parse the player CSV. Malformed rows are skipped and counted in `ParseStats::failed`.
pub fn parse_csv_to_records(csv_path: &Path) -> Result<(Vec<PlayerRecord>, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let mut records = Vec::new();
    let mut stats = ParseStats::default();

    for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
        stats.total_rows += 1;
        // header is line 1
        let line = i + 2;

        let parsed = row
            .map_err(|e| e.to_string())
            .and_then(CsvRow::into_record);
        match parsed {
            Ok(record) => {
                records.push(record);
                stats.parsed += 1;
            }
            Err(reason) => {
                stats.failed += 1;
                eprintln!("Warning: Line {} - {}", line, reason);
            }
        }
    }

    Ok((records, stats))
}

/// Build binary cache from the player CSV
///
/// Pipeline: CSV → PlayerIndex → MessagePack → LZ4 → Binary file
///
/// # Arguments
///
/// * `csv_path` - Input CSV file
/// * `output_msgpack_lz4` - Output binary file (e.g. data/exports/cache_players.v1.msgpack.lz4)
/// * `schema_version` - Schema version (e.g., "v1")
pub fn build_player_cache(
    csv_path: &Path,
    output_msgpack_lz4: &Path,
    schema_version: &str,
) -> Result<crate::CacheMetadata> {
    println!("Parsing CSV: {}", csv_path.display());
    let (records, stats) = parse_csv_to_records(csv_path)?;

    println!(
        "✅ Parsed {} players (failed: {}, total rows: {})",
        stats.parsed, stats.failed, stats.total_rows
    );
    if records.is_empty() {
        bail!("No valid player rows in {}", csv_path.display());
    }

    let index = PlayerIndex::from_records(records, schema_version);
    let metadata = crate::write_index_cache(&index, output_msgpack_lz4)?;

    println!(
        "✅ Cache built: {} → {} (ratio: {:.2}%)",
        human_bytes(metadata.original_size),
        human_bytes(metadata.compressed_size),
        metadata.compression_ratio * 100.0
    );

    Ok(metadata)
}

/// Human-readable byte size formatting
fn human_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_idx])
}
