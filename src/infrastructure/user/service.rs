//! User service: signup, login and focus session bookkeeping

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::user::{
    validate_credentials, NewUser, Outcome, Standing, User, UserId, UserRepository, UserStats,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

const INVALID_CREDENTIALS: &str = "Invalid username or password.";
const USERNAME_TAKEN: &str = "That username is already taken.";

/// Request for creating a new account, as submitted by the signup form
#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// User service for authentication and session recording
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Create an account. Both fields are trimmed before validation.
    ///
    /// The username check and the insert are separate steps; the store's
    /// uniqueness guarantee turns a lost race into the same conflict error.
    pub async fn signup(&self, request: SignupRequest) -> Result<User, DomainError> {
        let username = request.username.trim();
        let password = request.password.trim();

        validate_credentials(username, password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.username_exists(username).await? {
            return Err(DomainError::conflict(USERNAME_TAKEN));
        }

        let password_hash = self.hasher.hash(password)?;

        let user = self
            .repository
            .create(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id(), username = %user.username(), "User signed up");

        Ok(user)
    }

    /// Check a username/password pair. Unknown users and wrong passwords
    /// fail with the same authentication error.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let username = username.trim();
        let password = password.trim();

        let Some(user) = self.repository.get_by_username(username).await? else {
            warn!(username = %username, "Login failed: unknown username");
            return Err(DomainError::authentication(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify(password, user.password_hash()) {
            warn!(user_id = %user.id(), "Login failed: wrong password");
            return Err(DomainError::authentication(INVALID_CREDENTIALS));
        }

        info!(user_id = %user.id(), "User logged in");

        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    pub async fn record_win(&self, id: &UserId) -> Result<Standing, DomainError> {
        self.record(id, Outcome::Win).await
    }

    pub async fn record_loss(&self, id: &UserId) -> Result<Standing, DomainError> {
        self.record(id, Outcome::Loss).await
    }

    async fn record(&self, id: &UserId, outcome: Outcome) -> Result<Standing, DomainError> {
        let standing = self
            .repository
            .record_outcome(id, outcome)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        info!(
            user_id = %id,
            outcome = outcome.as_str(),
            wins = standing.wins,
            losses = standing.losses,
            streak = standing.streak,
            "Focus session recorded"
        );

        Ok(standing)
    }

    /// Current stats of one user
    pub async fn stats(&self, id: &UserId) -> Result<UserStats, DomainError> {
        self.repository
            .get(id)
            .await?
            .map(|user| user.stats())
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    /// Leaderboard: up to `limit` users by wins, ties in signup order
    pub async fn top_users(&self, limit: usize) -> Result<Vec<UserStats>, DomainError> {
        self.repository.top_by_wins(limit).await
    }

    /// Count users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}
