//! HTTP endpoints using axum.
//!
//! Endpoints:
//! - GET  /api/health               - health check + catalog size
//! - GET  /api/players/search?q=    - autocomplete
//! - GET  /api/game/state           - today's game (mints a session id when none is sent)
//! - POST /api/game/guess           - submit a guess
//! - POST /api/game/continuous-mode - keep guessing after the attempt limit

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use fg_core::{FeedbackResult, GameService, PlayerSearchResult};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;

pub const SESSION_HEADER: &str = "x-session-id";

/// Source of "now" for the game day.
pub type Clock = fn() -> DateTime<Utc>;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GameService>,
    pub clock: Clock,
}

pub fn router(service: Arc<GameService>) -> Router {
    router_with_clock(service, Utc::now)
}

pub fn router_with_clock(service: Arc<GameService>, clock: Clock) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/players/search", get(search_players))
        .route("/api/game/state", get(game_state))
        .route("/api/game/guess", post(submit_guess))
        .route("/api/game/continuous-mode", post(continuous_mode))
        .with_state(AppState { service, clock })
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

// ── Request / Response types ────────────────────────────────────────

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub players: usize,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessRequest {
    pub player_id: u32,
}

#[derive(Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

// ── Handlers ────────────────────────────────────────────────────────

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        players: state.service.catalog().len(),
    })
}

async fn search_players(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<PlayerSearchResult>>, ApiError> {
    let query = params.q.unwrap_or_default();
    Ok(Json(state.service.search(&query)?))
}

async fn game_state(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = match session_header(&headers)? {
        Some(id) => id,
        None => {
            let id = Uuid::new_v4().to_string();
            debug!(session = %id, "Minted new session id");
            id
        }
    };

    let view = state.service.game_state(&session_id, (state.clock)())?;
    Ok(([(SESSION_HEADER, session_id)], Json(view)))
}

async fn submit_guess(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<GuessRequest>, JsonRejection>,
) -> Result<Json<FeedbackResult>, ApiError> {
    let session_id = session_header(&headers)?.ok_or(ApiError::MissingSession)?;
    let Json(request) = body.map_err(|e| {
        debug!("Rejected guess body: {e}");
        ApiError::BadRequest("Invalid guess data".to_string())
    })?;

    let feedback = state
        .service
        .submit_guess(&session_id, request.player_id, (state.clock)())?;
    Ok(Json(feedback))
}

async fn continuous_mode(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, ApiError> {
    let session_id = session_header(&headers)?.ok_or(ApiError::MissingSession)?;
    state
        .service
        .enable_continuous_mode(&session_id, (state.clock)())?;
    Ok(Json(SuccessResponse { success: true }))
}

/// Session id from the request header. A header that is present but not text is an error.
fn session_header(headers: &HeaderMap) -> Result<Option<String>, ApiError> {
    match headers.get(SESSION_HEADER) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|id| Some(id.trim().to_string()))
            .map_err(|_| {
                ApiError::Game(fg_core::GameError::InvalidSession(
                    "must be visible ASCII".to_string(),
                ))
            }),
    }
}
