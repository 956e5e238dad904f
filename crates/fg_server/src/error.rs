//! HTTP error responses
//!
//! Every error body is `{"message": "..."}`, which is what the browser client reads.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fg_core::GameError;
use serde::Serialize;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    /// Game service rejected or failed the request.
    Game(GameError),
    /// Request could not be decoded.
    BadRequest(String),
    /// Endpoint needs an `x-session-id` header.
    MissingSession,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Game(GameError::PlayerNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Game(GameError::DuplicateGuess(_)) => StatusCode::CONFLICT,
            ApiError::Game(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Game(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) | ApiError::MissingSession => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Game(e) => {
                if status.is_server_error() {
                    error!("Request failed: {e}");
                }
                e.to_string()
            }
            ApiError::BadRequest(message) => message,
            ApiError::MissingSession => "Missing x-session-id header".to_string(),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<GameError> for ApiError {
    fn from(e: GameError) -> Self {
        ApiError::Game(e)
    }
}
