//! # fg_core - Daily Football Player Guessing Game
//!
//! 하루에 한 명의 정답 선수를 맞히는 게임의 핵심 로직.
//!
//! ## Features
//! - Attribute-by-attribute guess feedback (nationality, position, club, age, height, foot, career start)
//! - Deterministic daily answer per UTC day
//! - Per-session game state with in-memory or snapshot persistence
//! - Player catalog from embedded seed JSON or a MessagePack/LZ4 cache

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]

pub mod catalog;
pub mod daily;
pub mod data;
pub mod error;
pub mod feedback;
pub mod game;
pub mod models;
pub mod scoring;
pub mod store;

pub use catalog::{PlayerCatalog, PlayerIndex, CATALOG_SCHEMA_VERSION};
pub use daily::{game_date, next_game_time, DailySchedule};
pub use error::{CatalogError, GameError, Result};
pub use feedback::{compare_players, compare_players_at, FeedbackResult};
pub use game::{validate_session_id, GameRules, GameService, GameStateView};
pub use models::{DominantFoot, GuessedPlayer, Player, PlayerRecord, PlayerSearchResult};
pub use scoring::calculate_score;
pub use store::{GameStore, MemoryStore, SnapshotStore, StoreError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
