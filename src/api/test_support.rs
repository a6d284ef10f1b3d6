use std::sync::Arc;

use crate::api::session::SessionCookie;
use crate::api::state::AppState;
use crate::infrastructure::auth::JwtSessionService;
use crate::infrastructure::user::{Argon2Hasher, InMemoryUserRepository, UserService};

/// State backed by an in-memory store
pub fn test_state() -> AppState {
    let user_service = UserService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Argon2Hasher::new()),
    );

    AppState {
        user_service: Arc::new(user_service),
        session_tokens: Arc::new(JwtSessionService::new("test-session-secret", 1).unwrap()),
        session_cookie: SessionCookie::new("focus_battle_session", false, 1),
    }
}
