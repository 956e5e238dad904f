//! JSON seed catalog
//!
//! A seed file is a JSON array of `PlayerRecord`s. Ids are assigned in file
//! order, so reordering a seed reshuffles ids.

use crate::catalog::{PlayerCatalog, PlayerIndex, CATALOG_SCHEMA_VERSION};
use crate::error::CatalogError;
use crate::models::PlayerRecord;

/// Bundled seed used when no catalog path is configured.
pub const EMBEDDED_SEED_JSON: &str = include_str!("../../data/players.json");

/// Parse a JSON seed into an index (ids 1..=n).
pub fn load_seed_json(json: &str) -> Result<PlayerIndex, CatalogError> {
    let records: Vec<PlayerRecord> = serde_json::from_str(json)?;
    if records.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(PlayerIndex::from_records(records, CATALOG_SCHEMA_VERSION))
}

pub fn embedded_catalog() -> Result<PlayerCatalog, CatalogError> {
    load_seed_json(EMBEDDED_SEED_JSON).map(PlayerCatalog::from_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_seed_is_classified() {
        let catalog = embedded_catalog().unwrap();

        assert!(catalog.len() >= 20);
        for player in catalog.iter() {
            assert_ne!(player.continent, "Unknown", "{} has no continent", player.name);
            assert_ne!(
                player.position_category, "Unknown",
                "{} has no position category",
                player.name
            );
        }
    }

    #[test]
    fn test_empty_seed_rejected() {
        assert!(matches!(load_seed_json("[]"), Err(CatalogError::Empty)));
        assert!(matches!(load_seed_json("{"), Err(CatalogError::Json(_))));
    }
}
