//! Session guard for authenticated routes
//!
//! The guard only checks that the request carries a valid session token.
//! Resolving the user behind it is left to the handlers, which must cope with
//! an account that no longer exists.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::{User, UserId};

/// Authenticated user id, inserted into request extensions by the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUser(pub UserId);

/// Resolve the user id carried by the request's session token
pub fn session_user_id(headers: &HeaderMap, state: &AppState) -> Option<UserId> {
    let token = state.session_cookie.read(headers)?;

    match state
        .session_tokens
        .validate(&token)
        .and_then(|claims| claims.user_id())
    {
        Ok(user_id) => Some(user_id),
        Err(e) => {
            debug!(error = %e, "Rejected session token");
            None
        }
    }
}

/// Resolve the full user behind the request's session, if any
///
/// Any failure along the way (missing token, bad signature, deleted
/// account, storage error) yields `None`.
pub async fn current_user(headers: &HeaderMap, state: &AppState) -> Option<User> {
    let user_id = session_user_id(headers, state)?;

    state.user_service.get(&user_id).await.ok().flatten()
}

/// Guard for HTML pages: anonymous visitors are sent to the login form
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match session_user_id(request.headers(), &state) {
        Some(user_id) => {
            request.extensions_mut().insert(SessionUser(user_id));
            next.run(request).await
        }
        None => Redirect::to("/login").into_response(),
    }
}

/// Guard for JSON endpoints: anonymous callers get a 401
pub async fn require_api_session(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match session_user_id(request.headers(), &state) {
        Some(user_id) => {
            request.extensions_mut().insert(SessionUser(user_id));
            next.run(request).await
        }
        None => ApiError::unauthorized("Login required").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::test_state;
    use axum::http::header;
    use axum::http::StatusCode;
    use axum::{middleware, routing::get, Extension, Router};
    use tower::ServiceExt;

    async fn whoami(Extension(SessionUser(user_id)): Extension<SessionUser>) -> String {
        user_id.to_string()
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/page", get(whoami))
            .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
            .merge(
                Router::new()
                    .route("/api", get(whoami))
                    .route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_api_session,
                    )),
            )
            .with_state(state)
    }

    fn request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_page_without_session_redirects() {
        let response = app(test_state()).oneshot(request("/page", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[tokio::test]
    async fn test_api_without_session_is_unauthorized() {
        let response = app(test_state()).oneshot(request("/api", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_forged_token_rejected() {
        let response = app(test_state())
            .oneshot(request("/api", Some("focus_battle_session=forged.token.value")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_passes_user_id() {
        let state = test_state();
        let token = state.session_tokens.issue(&UserId::new(42)).unwrap();
        let cookie = format!("focus_battle_session={}", token);

        let response = app(state).oneshot(request("/page", Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"42");
    }

    #[tokio::test]
    async fn test_current_user_for_missing_account() {
        let state = test_state();
        let token = state.session_tokens.issue(&UserId::new(999)).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, format!("Bearer {}", token).parse().unwrap());

        assert_eq!(session_user_id(&headers, &state), Some(UserId::new(999)));
        assert!(current_user(&headers, &state).await.is_none());
    }
}
