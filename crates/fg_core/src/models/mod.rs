pub mod classify;
pub mod player;

pub use player::{
    normalize_asset, DominantFoot, GuessedPlayer, Player, PlayerRecord, PlayerSearchResult,
};
