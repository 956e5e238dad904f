//! Player catalog
//!
//! FxHashMap index by id plus the ascending id list used for the daily pick
//! and for deterministic search ordering.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::models::{Player, PlayerRecord};

pub const CATALOG_SCHEMA_VERSION: &str = "v1";

/// Serialized catalog form (cache file payload)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerIndex {
    /// Player lookup by id
    pub players: FxHashMap<u32, Player>,
    /// Total player count
    pub count: u32,
    /// Schema version
    pub schema_version: String,
}

impl PlayerIndex {
    pub fn new(schema_version: String) -> Self {
        Self {
            players: FxHashMap::default(),
            count: 0,
            schema_version,
        }
    }

    /// Add player to index. Fails on an id that is already present.
    pub fn insert(&mut self, player: Player) -> Result<(), CatalogError> {
        if self.players.contains_key(&player.id) {
            return Err(CatalogError::DuplicateId(player.id));
        }
        self.players.insert(player.id, player);
        self.count = self.players.len() as u32;
        Ok(())
    }

    /// Ingest records with 1-based ids in input order.
    pub fn from_records(records: Vec<PlayerRecord>, schema_version: &str) -> Self {
        let mut index = Self::new(schema_version.to_string());
        for (i, record) in records.into_iter().enumerate() {
            let id = i as u32 + 1;
            index.players.insert(id, Player::from_record(id, record));
        }
        index.count = index.players.len() as u32;
        index
    }

    /// Every map key must equal its player's id.
    pub fn validate(&self) -> Result<(), CatalogError> {
        match self.players.iter().find(|(key, player)| **key != player.id) {
            Some((key, player)) => Err(CatalogError::IdMismatch {
                key: *key,
                id: player.id,
            }),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Read-only player catalog shared by the game service.
#[derive(Debug, Clone)]
pub struct PlayerCatalog {
    index: PlayerIndex,
    ordered_ids: Vec<u32>,
}

impl PlayerCatalog {
    pub fn from_index(index: PlayerIndex) -> Self {
        let mut ordered_ids: Vec<u32> = index.players.keys().copied().collect();
        ordered_ids.sort_unstable();
        Self { index, ordered_ids }
    }

    pub fn from_records(records: Vec<PlayerRecord>) -> Self {
        Self::from_index(PlayerIndex::from_records(records, CATALOG_SCHEMA_VERSION))
    }

    pub fn get(&self, id: u32) -> Option<&Player> {
        self.index.players.get(&id)
    }

    /// Ids in ascending order
    pub fn ids(&self) -> &[u32] {
        &self.ordered_ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.ordered_ids
            .iter()
            .filter_map(|id| self.index.players.get(id))
    }

    pub fn len(&self) -> usize {
        self.ordered_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_ids.is_empty()
    }

    pub fn schema_version(&self) -> &str {
        &self.index.schema_version
    }

    /// Case-insensitive substring search over name, nationality and club.
    ///
    /// Ranking: name prefix, then name substring, then nationality/club match.
    /// Ties keep id order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Player> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut hits: Vec<(u8, &Player)> = self
            .iter()
            .filter_map(|player| {
                let name = player.name.to_lowercase();
                let rank = if name.starts_with(&needle) {
                    0
                } else if name.contains(&needle) {
                    1
                } else if player.nationality.to_lowercase().contains(&needle)
                    || player.club.to_lowercase().contains(&needle)
                {
                    2
                } else {
                    return None;
                };
                Some((rank, player))
            })
            .collect();

        // stable sort keeps id order inside a rank
        hits.sort_by_key(|(rank, _)| *rank);
        hits.into_iter().take(limit).map(|(_, p)| p).collect()
    }
}
