//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, Outcome, Standing, User, UserId, UserRepository, UserStats};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Users {
    /// Keyed by id so iteration follows creation order
    by_id: BTreeMap<UserId, User>,
    username_index: HashMap<String, UserId>,
    last_id: i64,
}

/// In-memory implementation of UserRepository
///
/// A single lock covers the check and the insert, so duplicate usernames are
/// rejected even under concurrent signups.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Users>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.by_id.get(id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;

        Ok(users
            .username_index
            .get(username)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.username_index.contains_key(&user.username) {
            return Err(DomainError::conflict("That username is already taken."));
        }

        users.last_id += 1;
        let id = UserId::new(users.last_id);
        let created = User::new(id, user.username, user.password_hash);

        users
            .username_index
            .insert(created.username().to_string(), id);
        users.by_id.insert(id, created.clone());

        Ok(created)
    }

    async fn record_outcome(
        &self,
        id: &UserId,
        outcome: Outcome,
    ) -> Result<Option<Standing>, DomainError> {
        let mut users = self.users.write().await;
        Ok(users.by_id.get_mut(id).map(|user| user.record(outcome)))
    }

    async fn top_by_wins(&self, limit: usize) -> Result<Vec<UserStats>, DomainError> {
        let users = self.users.read().await;

        let mut ranked: Vec<&User> = users.by_id.values().collect();
        // Stable sort keeps creation order among equal win counts
        ranked.sort_by(|a, b| b.wins().cmp(&a.wins()));

        Ok(ranked.into_iter().take(limit).map(User::stats).collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let users = self.users.read().await;
        Ok(users.by_id.len())
    }
}
