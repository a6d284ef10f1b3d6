//! Focus session JSON API
//!
//! Called by the dashboard's timer script once a session ends.

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::SessionUser;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::{Outcome, Standing, UserStats};

/// Routes mounted under `/api`; the guard is applied by the caller
pub fn create_focus_router() -> Router<AppState> {
    Router::new()
        .route("/session/win", post(record_win))
        .route("/session/loss", post(record_loss))
        .route("/stats", get(stats))
}

/// Counters after a recorded outcome
#[derive(Debug, Serialize, Deserialize)]
pub struct OutcomeResponse {
    pub status: Outcome,
    pub wins: u32,
    pub losses: u32,
    pub streak: u32,
}

impl OutcomeResponse {
    fn new(status: Outcome, standing: Standing) -> Self {
        Self {
            status,
            wins: standing.wins,
            losses: standing.losses,
            streak: standing.streak,
        }
    }
}

/// POST /api/session/win
pub async fn record_win(
    State(state): State<AppState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
) -> Result<Json<OutcomeResponse>, ApiError> {
    let standing = state.user_service.record_win(&user_id).await?;

    Ok(Json(OutcomeResponse::new(Outcome::Win, standing)))
}

/// POST /api/session/loss
pub async fn record_loss(
    State(state): State<AppState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
) -> Result<Json<OutcomeResponse>, ApiError> {
    let standing = state.user_service.record_loss(&user_id).await?;

    Ok(Json(OutcomeResponse::new(Outcome::Loss, standing)))
}

/// GET /api/stats
pub async fn stats(
    State(state): State<AppState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
) -> Result<Json<UserStats>, ApiError> {
    Ok(Json(state.user_service.stats(&user_id).await?))
}
