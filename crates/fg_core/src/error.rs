use thiserror::Error;

use crate::store::StoreError;

/// Guess-flow errors. Every variant except `AnswerNotFound` and `Store` is a
/// precondition failure on the caller's side.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Player not found: {0}")]
    PlayerNotFound(u32),

    #[error("Answer player not found: {0}")]
    AnswerNotFound(u32),

    #[error("Game is already completed")]
    GameCompleted,

    #[error("No attempts left")]
    NoAttemptsLeft,

    #[error("You still have attempts left")]
    AttemptsRemaining,

    #[error("Player {0} was already guessed")]
    DuplicateGuess(u32),

    #[error("Search query must be at least {min} characters")]
    QueryTooShort { min: usize },

    #[error("Invalid session id: {0}")]
    InvalidSession(String),

    #[error("No players found in the catalog")]
    EmptyCatalog,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl GameError {
    pub fn is_client_error(&self) -> bool {
        match self {
            GameError::PlayerNotFound(_)
            | GameError::GameCompleted
            | GameError::NoAttemptsLeft
            | GameError::AttemptsRemaining
            | GameError::DuplicateGuess(_)
            | GameError::QueryTooShort { .. }
            | GameError::InvalidSession(_) => true,
            GameError::AnswerNotFound(_) | GameError::EmptyCatalog | GameError::Store(_) => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Seed JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("LZ4 decompress failed: {0}")]
    Decompression(String),

    #[error("MessagePack deserialize failed: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("Duplicate player id: {0}")]
    DuplicateId(u32),

    #[error("Player stored under key {key} has id {id}")]
    IdMismatch { key: u32, id: u32 },

    #[error("Catalog is empty")]
    Empty,
}

pub type Result<T> = std::result::Result<T, GameError>;
