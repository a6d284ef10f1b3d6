//! Application state for shared services

use std::sync::Arc;

use crate::api::session::SessionCookie;
use crate::domain::user::{Standing, User, UserId, UserRepository, UserStats};
use crate::domain::DomainError;
use crate::infrastructure::auth::SessionTokenService;
use crate::infrastructure::user::{PasswordHasher, SignupRequest, UserService};

/// Application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub session_tokens: Arc<dyn SessionTokenService>,
    pub session_cookie: SessionCookie,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn signup(&self, request: SignupRequest) -> Result<User, DomainError>;
    async fn login(&self, username: &str, password: &str) -> Result<User, DomainError>;
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;
    async fn record_win(&self, id: &UserId) -> Result<Standing, DomainError>;
    async fn record_loss(&self, id: &UserId) -> Result<Standing, DomainError>;
    async fn stats(&self, id: &UserId) -> Result<UserStats, DomainError>;
    async fn top_users(&self, limit: usize) -> Result<Vec<UserStats>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn signup(&self, request: SignupRequest) -> Result<User, DomainError> {
        UserService::signup(self, request).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<User, DomainError> {
        UserService::login(self, username, password).await
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        UserService::get(self, id).await
    }

    async fn record_win(&self, id: &UserId) -> Result<Standing, DomainError> {
        UserService::record_win(self, id).await
    }

    async fn record_loss(&self, id: &UserId) -> Result<Standing, DomainError> {
        UserService::record_loss(self, id).await
    }

    async fn stats(&self, id: &UserId) -> Result<UserStats, DomainError> {
        UserService::stats(self, id).await
    }

    async fn top_users(&self, limit: usize) -> Result<Vec<UserStats>, DomainError> {
        UserService::top_users(self, limit).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        UserService::count(self).await
    }
}
