//! User entity and related types

use serde::{Deserialize, Serialize};

/// Database-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Result of a single focus session, reported by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Loss => "loss",
        }
    }
}

/// Win/loss counters of one account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Standing {
    pub wins: u32,
    pub losses: u32,
    pub streak: u32,
}

impl Standing {
    /// Apply an outcome: a win extends the streak, a loss resets it.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => {
                self.wins += 1;
                self.streak += 1;
            }
            Outcome::Loss => {
                self.losses += 1;
                self.streak = 0;
            }
        }
    }
}

/// Public view of a user's record, used by the stats API and leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub username: String,
    pub wins: u32,
    pub losses: u32,
    pub streak: u32,
}

/// Data needed to insert a new account; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    /// Argon2 PHC string - never exposed in serialization
    #[serde(skip_serializing, default)]
    password_hash: String,
    #[serde(flatten)]
    standing: Standing,
}

impl User {
    /// Create a freshly signed-up user with all counters at zero
    pub fn new(id: UserId, username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self::with_standing(id, username, password_hash, Standing::default())
    }

    /// Rebuild a user loaded from storage
    pub fn with_standing(
        id: UserId,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        standing: Standing,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash: password_hash.into(),
            standing,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn standing(&self) -> Standing {
        self.standing
    }

    pub fn wins(&self) -> u32 {
        self.standing.wins
    }

    pub fn losses(&self) -> u32 {
        self.standing.losses
    }

    pub fn streak(&self) -> u32 {
        self.standing.streak
    }

    pub fn record(&mut self, outcome: Outcome) -> Standing {
        self.standing.record(outcome);
        self.standing
    }

    pub fn stats(&self) -> UserStats {
        UserStats {
            username: self.username.clone(),
            wins: self.standing.wins,
            losses: self.standing.losses,
            streak: self.standing.streak,
        }
    }
}
