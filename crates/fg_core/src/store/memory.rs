use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use std::sync::{PoisonError, RwLock};

use super::{GameSession, GameStore, SessionKey, StoreError};

#[derive(Debug, Default)]
struct MemoryState {
    next_game_id: u64,
    sessions: FxHashMap<SessionKey, GameSession>,
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted sessions (snapshot load).
    pub(crate) fn from_sessions(next_game_id: u64, sessions: Vec<GameSession>) -> Self {
        let sessions = sessions
            .into_iter()
            .map(|session| (session.key(), session))
            .collect();
        Self {
            state: RwLock::new(MemoryState {
                next_game_id,
                sessions,
            }),
        }
    }

    /// (next game id, all sessions ordered by game id)
    pub(crate) fn export(&self) -> (u64, Vec<GameSession>) {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let mut sessions: Vec<GameSession> = state.sessions.values().cloned().collect();
        sessions.sort_by_key(|s| s.game_id);
        (state.next_game_id, sessions)
    }

    pub(crate) fn next_game_id(&self) -> u64 {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .next_game_id
    }

    /// Install a session that is already durable elsewhere.
    pub(crate) fn commit(&self, next_game_id: u64, session: GameSession) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.next_game_id = state.next_game_id.max(next_game_id);
        state.sessions.insert(session.key(), session);
    }

    /// Drop sessions dated before `cutoff`. Returns how many were removed.
    pub(crate) fn prune_before(&self, cutoff: NaiveDate) -> usize {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let before = state.sessions.len();
        state.sessions.retain(|key, _| key.date >= cutoff);
        before - state.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .sessions
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GameStore for MemoryStore {
    fn find(&self, session_id: &str, date: NaiveDate) -> Result<Option<GameSession>, StoreError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state
            .sessions
            .get(&SessionKey::new(session_id, date))
            .cloned())
    }

    fn create(
        &self,
        session_id: &str,
        date: NaiveDate,
        daily_player_id: u32,
    ) -> Result<GameSession, StoreError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.next_game_id += 1;
        let session = GameSession::new(state.next_game_id, session_id, date, daily_player_id);
        state.sessions.insert(session.key(), session.clone());
        Ok(session)
    }

    fn save(&self, session: &GameSession) -> Result<(), StoreError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.sessions.insert(session.key(), session.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let store = MemoryStore::new();

        let a = store.create("alpha", day(17), 3).unwrap();
        let b = store.create("beta", day(17), 3).unwrap();

        assert_eq!(a.game_id, 1);
        assert_eq!(b.game_id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_sessions_are_keyed_by_day() {
        let store = MemoryStore::new();
        store.create("alpha", day(17), 3).unwrap();

        assert!(store.find("alpha", day(17)).unwrap().is_some());
        assert!(store.find("alpha", day(18)).unwrap().is_none());
        assert!(store.find("beta", day(17)).unwrap().is_none());
    }

    #[test]
    fn test_prune_before_keeps_recent_days() {
        let store = MemoryStore::new();
        store.create("alpha", day(15), 3).unwrap();
        store.create("alpha", day(16), 3).unwrap();
        store.create("alpha", day(17), 3).unwrap();

        assert_eq!(store.prune_before(day(16)), 1);
        assert!(store.find("alpha", day(15)).unwrap().is_none());
        assert!(store.find("alpha", day(16)).unwrap().is_some());
        // ids keep counting
        assert_eq!(store.create("beta", day(17), 3).unwrap().game_id, 4);
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemoryStore::new();
        let mut session = store.create("alpha", day(17), 3).unwrap();
        session.completed = true;
        session.score = Some(83);

        store.save(&session).unwrap();

        let loaded = store.find("alpha", day(17)).unwrap().unwrap();
        assert!(loaded.completed);
        assert_eq!(loaded.score, Some(83));
        assert_eq!(store.len(), 1);
    }
}
