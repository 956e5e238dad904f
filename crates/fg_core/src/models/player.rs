use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::classify;

/// Dominant foot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DominantFoot {
    Left,
    Right,
}

impl DominantFoot {
    pub fn as_str(&self) -> &'static str {
        match self {
            DominantFoot::Left => "Left",
            DominantFoot::Right => "Right",
        }
    }
}

impl fmt::Display for DominantFoot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DominantFoot {
    type Err = String;

    /// Parse from string (case-insensitive, "L"/"R" accepted)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(DominantFoot::Left),
            "right" | "r" => Ok(DominantFoot::Right),
            other => Err(format!("Invalid dominant foot: '{other}'")),
        }
    }
}

fn default_active() -> bool {
    true
}

/// Catalog row as it arrives from a seed file or CSV, before classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub name: String,
    pub nationality: String,
    pub position: String,
    pub club: String,
    pub league: String,
    pub age: u8,
    /// cm
    pub height: u16,
    pub dominant_foot: DominantFoot,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub career_start: u16,
    #[serde(default)]
    pub career_end: Option<u16>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub club_image_url: Option<String>,
    #[serde(default)]
    pub nationality_image_url: Option<String>,
}

/// Catalog player
///
/// `continent` and `position_category` are filled once at ingestion and then
/// read as plain data. Nothing downstream re-derives them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub nationality: String,
    pub continent: String,
    pub position: String,
    pub position_category: String,
    pub club: String,
    pub league: String,
    pub age: u8,
    /// cm
    pub height: u16,
    pub dominant_foot: DominantFoot,
    pub is_active: bool,
    pub career_start: u16,
    pub career_end: Option<u16>,
    pub image_url: Option<String>,
    pub club_image_url: Option<String>,
    pub nationality_image_url: Option<String>,
}

impl Player {
    /// Ingest a record: classify continent / position category and clean up asset references.
    pub fn from_record(id: u32, record: PlayerRecord) -> Self {
        let continent = classify::continent_for(&record.nationality).to_string();
        let position_category = classify::position_category(&record.position).to_string();

        Self {
            id,
            name: record.name.trim().to_string(),
            nationality: record.nationality.trim().to_string(),
            continent,
            position: record.position.trim().to_string(),
            position_category,
            club: record.club.trim().to_string(),
            league: record.league.trim().to_string(),
            age: record.age,
            height: record.height,
            dominant_foot: record.dominant_foot,
            is_active: record.is_active,
            career_start: record.career_start,
            career_end: record.career_end,
            image_url: normalize_asset(record.image_url),
            club_image_url: normalize_asset(record.club_image_url),
            nationality_image_url: normalize_asset(record.nationality_image_url),
        }
    }

    /// Redacted projection shown next to a guess.
    pub fn guessed_projection(&self) -> GuessedPlayer {
        GuessedPlayer {
            id: self.id,
            name: self.name.clone(),
            nationality: self.nationality.clone(),
            club: self.club.clone(),
            image_url: self.image_url.clone(),
        }
    }

    pub fn search_result(&self) -> PlayerSearchResult {
        PlayerSearchResult {
            id: self.id,
            name: self.name.clone(),
            nationality: self.nationality.clone(),
            club: self.club.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Asset reference cleanup: blank strings and JS-style "undefined"/"null"
/// leftovers mean "no asset".
pub fn normalize_asset(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("undefined")
            || trimmed.eq_ignore_ascii_case("null")
        {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Guessed player as embedded in a feedback result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GuessedPlayer {
    pub id: u32,
    pub name: String,
    pub nationality: String,
    pub club: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Autocomplete entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSearchResult {
    pub id: u32,
    pub name: String,
    pub nationality: String,
    pub club: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
