//! Cache Builder CLI
//!
//! 선수 카탈로그 캐시 빌더
//! CSV / JSON seed → MessagePack+LZ4

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "cache_builder")]
#[command(about = "Build the player catalog cache from CSV or a JSON seed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Build player cache from CSV file
    Players {
        /// Input CSV file path
        #[arg(long)]
        csv: PathBuf,

        /// Output MsgPack+LZ4 file path
        #[arg(long)]
        out: PathBuf,

        /// Schema version
        #[arg(long, default_value = fg_core::CATALOG_SCHEMA_VERSION)]
        schema_version: String,

        /// Verify cache after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Build player cache from a JSON seed file
    Seed {
        /// Input JSON file path (array of player records)
        #[arg(long)]
        json: PathBuf,

        /// Output MsgPack+LZ4 file path
        #[arg(long)]
        out: PathBuf,

        /// Schema version
        #[arg(long, default_value = fg_core::CATALOG_SCHEMA_VERSION)]
        schema_version: String,

        /// Verify cache after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let (out, verify, metadata, meta) = match cli.command {
        Commands::Players {
            csv,
            out,
            schema_version,
            verify,
            metadata,
        } => {
            println!("🔨 Building player cache from CSV...");
            println!("   CSV Input: {}", csv.display());
            println!("   Output:    {}", out.display());
            println!("   Schema:    {}", schema_version);

            let meta = cache_builder::build_player_cache(&csv, &out, &schema_version)?;
            (out, verify, metadata, meta)
        }

        Commands::Seed {
            json,
            out,
            schema_version,
            verify,
            metadata,
        } => {
            println!("🔨 Building player cache from JSON seed...");
            println!("   Input:  {}", json.display());
            println!("   Output: {}", out.display());
            println!("   Schema: {}", schema_version);

            let meta = cache_builder::build_seed_cache(&json, &out, &schema_version)?;
            (out, verify, metadata, meta)
        }
    };

    print_metadata(&meta);

    if verify {
        verify_cache_integrity(&out, &meta.checksum)?;
    }

    if let Some(metadata_path) = metadata {
        save_metadata(&metadata_path, &meta)?;
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &cache_builder::CacheMetadata) {
    println!("\n✅ Cache built successfully!");
    println!("   Players:         {}", meta.player_count);
    println!(
        "   Original size:   {} bytes ({:.2} KB)",
        meta.original_size,
        meta.original_size as f64 / 1024.0
    );
    println!(
        "   Compressed size: {} bytes ({:.2} KB)",
        meta.compressed_size,
        meta.compressed_size as f64 / 1024.0
    );
    println!("   Compression:     {:.1}%", meta.compression_ratio * 100.0);
    println!("   Checksum:        {}", meta.checksum);
    println!("   Created:         {}", meta.created_at);
}

#[cfg(feature = "cli")]
fn verify_cache_integrity(cache_path: &Path, checksum: &str) -> Result<()> {
    println!("\n🔍 Verifying cache integrity...");
    if !cache_builder::verify_cache(cache_path, checksum)? {
        anyhow::bail!("❌ Cache verification failed - checksum mismatch!");
    }

    // decode it the way the server will
    let index = cache_builder::load_player_cache(cache_path)?;
    println!("✅ Cache verification passed ({} players)", index.count);
    Ok(())
}

#[cfg(feature = "cli")]
fn save_metadata(path: &Path, meta: &cache_builder::CacheMetadata) -> Result<()> {
    let metadata_json = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, metadata_json)?;
    println!("\n📄 Metadata saved to: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("cache_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
