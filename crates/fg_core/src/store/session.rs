use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::feedback::FeedbackResult;

/// One session's game for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub game_id: u64,
    pub session_id: String,
    pub date: NaiveDate,
    pub daily_player_id: u32,
    pub continuous_mode_enabled: bool,
    pub completed: bool,
    pub score: Option<u32>,
    /// Guess history, oldest first
    pub guesses: Vec<FeedbackResult>,
}

impl GameSession {
    pub fn new(game_id: u64, session_id: &str, date: NaiveDate, daily_player_id: u32) -> Self {
        Self {
            game_id,
            session_id: session_id.to_string(),
            date,
            daily_player_id,
            continuous_mode_enabled: false,
            completed: false,
            score: None,
            guesses: Vec::new(),
        }
    }

    pub fn attempts(&self) -> u32 {
        self.guesses.len() as u32
    }

    pub fn has_guessed(&self, player_id: u32) -> bool {
        self.guesses
            .iter()
            .any(|guess| guess.guessed_player.id == player_id)
    }

    pub fn key(&self) -> SessionKey {
        SessionKey::new(&self.session_id, self.date)
    }
}

/// Store key: one game per session per day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub session_id: String,
    pub date: NaiveDate,
}

impl SessionKey {
    pub fn new(session_id: &str, date: NaiveDate) -> Self {
        Self {
            session_id: session_id.to_string(),
            date,
        }
    }
}
