//! User repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{NewUser, Outcome, Standing, User, UserId, UserStats};
use crate::domain::DomainError;

/// Repository trait for user storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by their ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their username (exact, case-sensitive match)
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user with zeroed counters.
    ///
    /// Fails with `DomainError::Conflict` when the username is taken.
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Apply an outcome to a user's counters as a single atomic update.
    ///
    /// Returns the counters after the update, or `None` if the user no
    /// longer exists.
    async fn record_outcome(
        &self,
        id: &UserId,
        outcome: Outcome,
    ) -> Result<Option<Standing>, DomainError>;

    /// Users ordered by wins descending, ties in creation order
    async fn top_by_wins(&self, limit: usize) -> Result<Vec<UserStats>, DomainError>;

    /// Count all users
    async fn count(&self) -> Result<usize, DomainError>;

    /// Check if a username exists
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_username(username).await?.is_some())
    }
}
