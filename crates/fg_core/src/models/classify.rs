//! Ingestion-time classification tables
//!
//! 국가 → 대륙, 포지션 → 포지션 카테고리 매핑.
//! Only ingestion (`Player::from_record`) calls these. Comparison reads the
//! stored result, so editing a table never rewrites feedback already given.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

pub const UNKNOWN: &str = "Unknown";

pub const ATTACK: &str = "Attack";
pub const MIDFIELD: &str = "Midfield";
pub const DEFENSE: &str = "Defense";
pub const GOALKEEPER: &str = "Goalkeeper";

static CONTINENTS: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    const EUROPE: &[&str] = &[
        "England",
        "Spain",
        "France",
        "Germany",
        "Italy",
        "Portugal",
        "Netherlands",
        "Belgium",
        "Croatia",
        "Wales",
        "Scotland",
        "Norway",
        "Sweden",
        "Denmark",
        "Switzerland",
        "Austria",
        "Poland",
        "Ukraine",
        "Russia",
        "Serbia",
        "Greece",
    ];
    const SOUTH_AMERICA: &[&str] = &[
        "Brazil",
        "Argentina",
        "Uruguay",
        "Colombia",
        "Chile",
        "Peru",
        "Ecuador",
        "Venezuela",
        "Paraguay",
    ];
    const NORTH_AMERICA: &[&str] = &["United States", "Mexico", "Canada", "Jamaica", "Costa Rica"];
    const AFRICA: &[&str] = &[
        "Senegal",
        "Egypt",
        "Morocco",
        "Nigeria",
        "Ghana",
        "Cameroon",
        "Ivory Coast",
        "Algeria",
    ];
    // Australia plays in the AFC, so it groups with Asia.
    const ASIA: &[&str] = &[
        "Japan",
        "South Korea",
        "China",
        "Iran",
        "Saudi Arabia",
        "Qatar",
        "Australia",
    ];

    let mut map = FxHashMap::default();
    for (continent, countries) in [
        ("Europe", EUROPE),
        ("South America", SOUTH_AMERICA),
        ("North America", NORTH_AMERICA),
        ("Africa", AFRICA),
        ("Asia", ASIA),
    ] {
        for country in countries {
            map.insert(*country, continent);
        }
    }
    map
});

/// Continent for a country name, `"Unknown"` when the country is not tabled.
pub fn continent_for(country: &str) -> &'static str {
    CONTINENTS.get(country.trim()).copied().unwrap_or(UNKNOWN)
}

/// Coarse category for a position label.
///
/// Accepts both the long labels used by the catalog ("Center-Back") and the
/// usual abbreviations ("CB"). Matching is case-insensitive.
pub fn position_category(position: &str) -> &'static str {
    match position.trim().to_ascii_lowercase().as_str() {
        "forward" | "striker" | "center-forward" | "centre-forward" | "winger" | "st" | "cf"
        | "lw" | "rw" | "fw" => ATTACK,
        "midfielder"
        | "central midfielder"
        | "defensive midfielder"
        | "attacking midfielder"
        | "cam"
        | "cm"
        | "cdm"
        | "dm"
        | "lm"
        | "rm"
        | "mf" => MIDFIELD,
        "defender" | "center-back" | "centre-back" | "full-back" | "left-back" | "right-back"
        | "cb" | "lb" | "rb" | "lwb" | "rwb" | "df" => DEFENSE,
        "goalkeeper" | "gk" => GOALKEEPER,
        _ => UNKNOWN,
    }
}
