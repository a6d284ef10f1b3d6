//! Authenticated HTML pages

pub mod render;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Extension, Router,
};
use tracing::{error, info};

use crate::api::middleware::SessionUser;
use crate::api::state::AppState;
use crate::domain::{DomainError, LEADERBOARD_LIMIT};

/// Routes that require a session; the guard is applied by the caller
pub fn create_pages_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/leaderboard", get(leaderboard))
}

/// Failure while rendering a page
///
/// Details are logged; the visitor only sees a generic error page.
#[derive(Debug)]
pub struct PageError(DomainError);

impl From<DomainError> for PageError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Failed to render page");
        (StatusCode::INTERNAL_SERVER_ERROR, Html(render::error_page())).into_response()
    }
}

/// The session points at an account that no longer exists
fn expired_session(state: &AppState, SessionUser(user_id): SessionUser) -> Response {
    info!(user_id = %user_id, "Session refers to a missing user, clearing it");
    (
        [(header::SET_COOKIE, state.session_cookie.clear())],
        Redirect::to("/login"),
    )
        .into_response()
}

/// GET /dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
) -> Result<Response, PageError> {
    let Some(user) = state.user_service.get(&session.0).await? else {
        return Ok(expired_session(&state, session));
    };

    Ok(Html(render::dashboard_page(&user)).into_response())
}

/// GET /leaderboard
pub async fn leaderboard(
    State(state): State<AppState>,
    Extension(session): Extension<SessionUser>,
) -> Result<Response, PageError> {
    let Some(user) = state.user_service.get(&session.0).await? else {
        return Ok(expired_session(&state, session));
    };

    let top = state.user_service.top_users(LEADERBOARD_LIMIT).await?;

    Ok(Html(render::leaderboard_page(&top, Some(user.username()))).into_response())
}
