//! Signup, login and logout
//!
//! Form pages backed by the user service. A successful signup or login
//! stores a signed session token in a cookie and redirects to the dashboard.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::api::middleware::{current_user, session_user_id};
use crate::api::pages::{render, PageError};
use crate::api::state::AppState;
use crate::domain::user::User;
use crate::infrastructure::user::SignupRequest;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/signup", get(signup_form).post(signup))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}

/// Submitted credentials; missing fields count as empty
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    if current_user(&headers, &state).await.is_some() {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/login")
    }
}

/// GET /signup
pub async fn signup_form() -> Html<String> {
    Html(render::signup_page(None, ""))
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, PageError> {
    let request = SignupRequest {
        username: form.username.clone(),
        password: form.password,
    };

    match state.user_service.signup(request).await {
        Ok(user) => start_session(&state, &user),
        Err(e) => match e.user_message().map(str::to_owned) {
            Some(message) => {
                Ok(Html(render::signup_page(Some(&message), form.username.trim())).into_response())
            }
            None => Err(e.into()),
        },
    }
}

/// GET /login
pub async fn login_form() -> Html<String> {
    Html(render::login_page(None, ""))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, PageError> {
    match state.user_service.login(&form.username, &form.password).await {
        Ok(user) => start_session(&state, &user),
        Err(e) => match e.user_message().map(str::to_owned) {
            Some(message) => {
                Ok(Html(render::login_page(Some(&message), form.username.trim())).into_response())
            }
            None => Err(e.into()),
        },
    }
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(user_id) = session_user_id(&headers, &state) {
        info!(user_id = %user_id, "User logged out");
    }

    (
        [(header::SET_COOKIE, state.session_cookie.clear())],
        Redirect::to("/login"),
    )
        .into_response()
}

fn start_session(state: &AppState, user: &User) -> Result<Response, PageError> {
    let token = state.session_tokens.issue(&user.id())?;

    Ok((
        [(header::SET_COOKIE, state.session_cookie.set(&token))],
        Redirect::to("/dashboard"),
    )
        .into_response())
}
