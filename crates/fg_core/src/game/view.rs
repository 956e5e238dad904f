use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::daily::next_game_time;
use crate::feedback::FeedbackResult;
use crate::models::GuessedPlayer;
use crate::store::GameSession;

/// Game state as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateView {
    pub game_id: u64,
    pub session_id: String,
    pub attempts: u32,
    pub max_attempts: u32,
    pub continuous_mode_enabled: bool,
    pub completed: bool,
    pub guesses: Vec<FeedbackResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_game_time: Option<DateTime<Utc>>,
    /// Only filled once the game is completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<GuessedPlayer>,
}

impl GameStateView {
    pub fn from_session(
        session: &GameSession,
        max_attempts: u32,
        answer: Option<GuessedPlayer>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            game_id: session.game_id,
            session_id: session.session_id.clone(),
            attempts: session.attempts(),
            max_attempts,
            continuous_mode_enabled: session.continuous_mode_enabled,
            completed: session.completed,
            guesses: session.guesses.clone(),
            score: session.score,
            next_game_time: session.completed.then(|| next_game_time(now)),
            answer: answer.filter(|_| session.completed),
        }
    }
}
