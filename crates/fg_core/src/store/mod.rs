//! Session game store
//!
//! 세션별 게임 상태 저장소. Backends are picked at start-up and handed to
//! `GameService`; there is no process-wide store.

pub mod error;
pub mod memory;
pub mod session;
pub mod snapshot;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use session::{GameSession, SessionKey};
pub use snapshot::{SnapshotStore, SNAPSHOT_VERSION};

use chrono::NaiveDate;

/// Persistence seam for game sessions.
///
/// Implementations only store; the check-compare-append sequence is
/// serialized per session by the caller.
pub trait GameStore: Send + Sync {
    /// Today's game for a session, if one was created.
    fn find(&self, session_id: &str, date: NaiveDate) -> Result<Option<GameSession>, StoreError>;

    /// Create and persist a fresh game with a new game id.
    fn create(
        &self,
        session_id: &str,
        date: NaiveDate,
        daily_player_id: u32,
    ) -> Result<GameSession, StoreError>;

    /// Persist the current state of a game (upsert by session key).
    fn save(&self, session: &GameSession) -> Result<(), StoreError>;
}
