//! Game service
//!
//! 추측 제출 흐름: 시도 횟수 확인 → 비교 → 기록 → 완료 처리.
//! Each session's sequence runs under that session's lock, so two concurrent
//! submissions cannot both pass the attempt limit.

mod view;

pub use view::GameStateView;

use chrono::{DateTime, NaiveDate, Utc};
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

use crate::catalog::PlayerCatalog;
use crate::daily::{game_date, DailySchedule};
use crate::error::{GameError, Result};
use crate::feedback::{compare_players_at, FeedbackResult};
use crate::models::PlayerSearchResult;
use crate::scoring::calculate_score;
use crate::store::{GameSession, GameStore};

pub const MAX_SESSION_ID_LEN: usize = 128;

/// Lock-map size above which idle per-session locks are dropped.
const SESSION_LOCK_PRUNE_AT: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    pub max_attempts: u32,
    pub search_limit: usize,
    pub min_query_len: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            search_limit: 10,
            min_query_len: 3,
        }
    }
}

pub struct GameService {
    catalog: Arc<PlayerCatalog>,
    store: Arc<dyn GameStore>,
    rules: GameRules,
    schedule: DailySchedule,
    /// Today's answer, resolved once per day and shared by every session.
    daily: Mutex<Option<(NaiveDate, u32)>>,
    session_locks: Mutex<FxHashMap<String, Arc<Mutex<()>>>>,
}

impl GameService {
    pub fn new(
        catalog: Arc<PlayerCatalog>,
        store: Arc<dyn GameStore>,
        rules: GameRules,
        schedule: DailySchedule,
    ) -> Self {
        Self {
            catalog,
            store,
            rules,
            schedule,
            daily: Mutex::new(None),
            session_locks: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn catalog(&self) -> &PlayerCatalog {
        &self.catalog
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Autocomplete search.
    pub fn search(&self, query: &str) -> Result<Vec<PlayerSearchResult>> {
        if query.trim().chars().count() < self.rules.min_query_len {
            return Err(GameError::QueryTooShort {
                min: self.rules.min_query_len,
            });
        }

        Ok(self
            .catalog
            .search(query, self.rules.search_limit)
            .into_iter()
            .map(|player| player.search_result())
            .collect())
    }

    /// Today's game for a session, created on first access.
    pub fn game_state(&self, session_id: &str, now: DateTime<Utc>) -> Result<GameStateView> {
        validate_session_id(session_id)?;
        let lock = self.session_lock(session_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let session = self.load_or_create(session_id, game_date(now))?;
        Ok(self.view(&session, now))
    }

    /// Submit one guess and return its feedback.
    pub fn submit_guess(
        &self,
        session_id: &str,
        player_id: u32,
        now: DateTime<Utc>,
    ) -> Result<FeedbackResult> {
        validate_session_id(session_id)?;
        let lock = self.session_lock(session_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut session = self.load_or_create(session_id, game_date(now))?;

        if session.completed {
            return Err(GameError::GameCompleted);
        }
        if !session.continuous_mode_enabled && session.attempts() >= self.rules.max_attempts {
            return Err(GameError::NoAttemptsLeft);
        }

        let guessed = self
            .catalog
            .get(player_id)
            .ok_or(GameError::PlayerNotFound(player_id))?;
        if session.has_guessed(player_id) {
            debug!(session = session_id, player_id, "Rejected duplicate guess");
            return Err(GameError::DuplicateGuess(player_id));
        }
        let answer = self
            .catalog
            .get(session.daily_player_id)
            .ok_or(GameError::AnswerNotFound(session.daily_player_id))?;

        let feedback = compare_players_at(guessed, answer, now);
        session.guesses.push(feedback.clone());

        if feedback.correct {
            let score = calculate_score(session.attempts(), self.rules.max_attempts);
            session.completed = true;
            session.score = Some(score);
            info!(
                game_id = session.game_id,
                attempts = session.attempts(),
                score,
                "Game completed"
            );
        }

        self.store.save(&session)?;
        Ok(feedback)
    }

    /// Allow guessing past the attempt limit.
    pub fn enable_continuous_mode(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> Result<GameStateView> {
        validate_session_id(session_id)?;
        let lock = self.session_lock(session_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut session = self.load_or_create(session_id, game_date(now))?;

        if session.attempts() < self.rules.max_attempts {
            return Err(GameError::AttemptsRemaining);
        }
        if session.completed {
            return Err(GameError::GameCompleted);
        }

        if !session.continuous_mode_enabled {
            session.continuous_mode_enabled = true;
            self.store.save(&session)?;
            info!(game_id = session.game_id, "Continuous mode enabled");
        }

        Ok(self.view(&session, now))
    }

    fn view(&self, session: &GameSession, now: DateTime<Utc>) -> GameStateView {
        let answer = self
            .catalog
            .get(session.daily_player_id)
            .map(|player| player.guessed_projection());
        GameStateView::from_session(session, self.rules.max_attempts, answer, now)
    }

    fn load_or_create(&self, session_id: &str, date: NaiveDate) -> Result<GameSession> {
        if let Some(session) = self.store.find(session_id, date)? {
            return Ok(session);
        }

        let daily_player_id = self.daily_player_id(date)?;
        let session = self.store.create(session_id, date, daily_player_id)?;
        info!(
            game_id = session.game_id,
            session = session_id,
            %date,
            "Created new game"
        );
        Ok(session)
    }

    fn daily_player_id(&self, date: NaiveDate) -> Result<u32> {
        let mut daily = self.daily.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((cached_date, player_id)) = *daily {
            if cached_date == date {
                return Ok(player_id);
            }
        }

        let player_id = self
            .schedule
            .pick(date, &self.catalog)
            .ok_or(GameError::EmptyCatalog)?;
        *daily = Some((date, player_id));
        info!(%date, player_id, "Resolved daily player");
        Ok(player_id)
    }

    fn session_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .session_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if locks.len() > SESSION_LOCK_PRUNE_AT {
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        }
        locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Session ids: 1..=128 visible ASCII characters.
pub fn validate_session_id(session_id: &str) -> Result<()> {
    if session_id.is_empty() {
        return Err(GameError::InvalidSession("empty".to_string()));
    }
    if session_id.len() > MAX_SESSION_ID_LEN {
        return Err(GameError::InvalidSession(format!(
            "longer than {MAX_SESSION_ID_LEN} characters"
        )));
    }
    if !session_id.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(GameError::InvalidSession(
            "must be visible ASCII".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::embedded_catalog;
    use crate::store::{MemoryStore, SnapshotStore, StoreError};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    fn service(max_attempts: u32) -> GameService {
        let catalog = Arc::new(embedded_catalog().unwrap());
        let rules = GameRules {
            max_attempts,
            ..GameRules::default()
        };
        GameService::new(
            catalog,
            Arc::new(MemoryStore::new()),
            rules,
            DailySchedule::new(7),
        )
    }

    fn answer_id(service: &GameService) -> u32 {
        service.daily_player_id(game_date(now())).unwrap()
    }

    fn wrong_ids(service: &GameService, n: usize) -> Vec<u32> {
        let answer = answer_id(service);
        service
            .catalog()
            .ids()
            .iter()
            .copied()
            .filter(|id| *id != answer)
            .take(n)
            .collect()
    }

    #[test]
    fn test_new_session_state() {
        let service = service(6);
        let state = service.game_state("alpha", now()).unwrap();

        assert_eq!(state.attempts, 0);
        assert_eq!(state.max_attempts, 6);
        assert!(!state.completed);
        assert!(state.guesses.is_empty());
        assert_eq!(state.next_game_time, None);
        assert_eq!(state.answer, None);
    }

    #[test]
    fn test_sessions_share_daily_answer_but_not_history() {
        let service = service(6);
        let wrong = wrong_ids(&service, 1)[0];

        service.submit_guess("alpha", wrong, now()).unwrap();

        let alpha = service.game_state("alpha", now()).unwrap();
        let beta = service.game_state("beta", now()).unwrap();
        assert_eq!(alpha.attempts, 1);
        assert_eq!(beta.attempts, 0);
        assert_ne!(alpha.game_id, beta.game_id);
    }

    #[test]
    fn test_correct_guess_completes_with_score() {
        let service = service(6);
        let wrong = wrong_ids(&service, 2);
        let answer = answer_id(&service);

        service.submit_guess("alpha", wrong[0], now()).unwrap();
        service.submit_guess("alpha", wrong[1], now()).unwrap();
        let feedback = service.submit_guess("alpha", answer, now()).unwrap();

        assert!(feedback.correct);
        let state = service.game_state("alpha", now()).unwrap();
        assert!(state.completed);
        assert_eq!(state.score, Some(67));
        assert_eq!(
            state.next_game_time,
            Some(Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap())
        );
        assert_eq!(state.answer.map(|p| p.id), Some(answer));

        assert!(matches!(
            service.submit_guess("alpha", wrong[0], now()),
            Err(GameError::GameCompleted)
        ));
    }

    #[test]
    fn test_attempt_limit_and_continuous_mode() {
        let service = service(2);
        let wrong = wrong_ids(&service, 3);

        assert!(matches!(
            service.enable_continuous_mode("alpha", now()),
            Err(GameError::AttemptsRemaining)
        ));

        service.submit_guess("alpha", wrong[0], now()).unwrap();
        service.submit_guess("alpha", wrong[1], now()).unwrap();
        assert!(matches!(
            service.submit_guess("alpha", wrong[2], now()),
            Err(GameError::NoAttemptsLeft)
        ));

        let state = service.enable_continuous_mode("alpha", now()).unwrap();
        assert!(state.continuous_mode_enabled);

        service.submit_guess("alpha", wrong[2], now()).unwrap();
        let feedback = service
            .submit_guess("alpha", answer_id(&service), now())
            .unwrap();
        assert!(feedback.correct);

        let state = service.game_state("alpha", now()).unwrap();
        assert_eq!(state.attempts, 4);
        assert_eq!(state.score, Some(0));
    }

    #[test]
    fn test_guess_preconditions() {
        let service = service(6);
        let wrong = wrong_ids(&service, 1)[0];

        assert!(matches!(
            service.submit_guess("alpha", 9999, now()),
            Err(GameError::PlayerNotFound(9999))
        ));

        service.submit_guess("alpha", wrong, now()).unwrap();
        assert!(matches!(
            service.submit_guess("alpha", wrong, now()),
            Err(GameError::DuplicateGuess(id)) if id == wrong
        ));

        // rejected guesses do not count
        assert_eq!(service.game_state("alpha", now()).unwrap().attempts, 1);
    }

    #[test]
    fn test_missing_answer_is_server_error() {
        let service = service(6);
        let store = MemoryStore::new();
        let session = store.create("alpha", game_date(now()), 9999).unwrap();
        let service = GameService::new(
            Arc::new(service.catalog().clone()),
            Arc::new(store),
            GameRules::default(),
            DailySchedule::default(),
        );

        let err = service.submit_guess(&session.session_id, 1, now()).unwrap_err();
        assert!(matches!(err, GameError::AnswerNotFound(9999)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_new_day_starts_new_game() {
        let service = service(6);
        let wrong = wrong_ids(&service, 1)[0];
        service.submit_guess("alpha", wrong, now()).unwrap();

        let tomorrow = Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap();
        let state = service.game_state("alpha", tomorrow).unwrap();

        assert_eq!(state.attempts, 0);
    }

    #[test]
    fn test_concurrent_guesses_respect_limit() {
        let service = Arc::new(service(3));
        let wrong = wrong_ids(&service, 8);

        let handles: Vec<_> = wrong
            .into_iter()
            .map(|id| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || service.submit_guess("alpha", id, now()).is_ok())
            })
            .collect();
        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(accepted, 3);
        assert_eq!(service.game_state("alpha", now()).unwrap().attempts, 3);
    }

    #[test]
    fn test_failed_save_does_not_count_attempt() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sessions.msgpack.lz4");
        let service = GameService::new(
            Arc::new(embedded_catalog().unwrap()),
            Arc::new(SnapshotStore::open(&path).unwrap()),
            GameRules::default(),
            DailySchedule::new(7),
        );
        let wrong = wrong_ids(&service, 1)[0];
        service.game_state("alpha", now()).unwrap();

        std::fs::create_dir(path.with_extension("tmp")).unwrap();
        let err = service.submit_guess("alpha", wrong, now()).unwrap_err();
        assert!(matches!(err, GameError::Store(StoreError::Io(_))));
        assert_eq!(service.game_state("alpha", now()).unwrap().attempts, 0);

        // retry once the disk is writable again
        std::fs::remove_dir(path.with_extension("tmp")).unwrap();
        service.submit_guess("alpha", wrong, now()).unwrap();
        assert_eq!(service.game_state("alpha", now()).unwrap().attempts, 1);
    }

    #[test]
    fn test_search_requires_min_length() {
        let service = service(6);

        assert!(matches!(
            service.search("ha"),
            Err(GameError::QueryTooShort { min: 3 })
        ));
        let results = service.search("haa").unwrap();
        assert_eq!(results[0].name, "Erling Haaland");
    }

    #[test]
    fn test_session_id_validation() {
        assert!(validate_session_id("3f2c9a4e-session").is_ok());
        assert!(validate_session_id("").is_err());
        assert!(validate_session_id("has space").is_err());
        assert!(validate_session_id(&"x".repeat(129)).is_err());
    }
}
