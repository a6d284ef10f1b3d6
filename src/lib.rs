//! Focus Battle
//!
//! A small web app where users run focus sessions against a timer:
//! - Signup and login with argon2-hashed passwords
//! - Signed session cookies
//! - Win/loss/streak tracking and a wins leaderboard
//! - JSON endpoints for the dashboard timer

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use api::session::SessionCookie;
use api::state::{AppState, UserServiceTrait};
use config::StorageBackend;
use infrastructure::{
    auth::JwtSessionService,
    storage::SqliteDatabase,
    user::{Argon2Hasher, InMemoryUserRepository, SqliteUserRepository, UserService},
};

/// Create application state with the given configuration
///
/// For the SQLite backend the schema is created if it does not exist yet.
/// An unusable session lifetime is rejected before any storage is touched.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let session = &config.session;
    let session_tokens = Arc::new(
        JwtSessionService::new(&session.secret, session.expiration_hours)
            .context("Invalid session configuration")?,
    );

    let hasher = Arc::new(Argon2Hasher::new());

    let user_service: Arc<dyn UserServiceTrait> = match config.database.backend {
        StorageBackend::Sqlite => {
            let database = SqliteDatabase::new(&config.database.path);
            database.init_schema().await?;
            info!(path = %config.database.path, "Using SQLite storage for users");

            let repository = Arc::new(SqliteUserRepository::new(database));
            Arc::new(UserService::new(repository, hasher))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage for users, accounts are lost on restart");

            let repository = Arc::new(InMemoryUserRepository::new());
            Arc::new(UserService::new(repository, hasher))
        }
    };

    let session_cookie = SessionCookie::new(
        session.cookie_name.clone(),
        session.secure_cookie,
        session.expiration_hours,
    );

    Ok(AppState {
        user_service,
        session_tokens,
        session_cookie,
    })
}
