//! User domain
//!
//! Accounts, their win/loss counters, signup validation and the repository
//! trait implemented by the storage backends.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, Outcome, Standing, User, UserId, UserStats};
pub use repository::UserRepository;
pub use validation::{
    validate_credentials, validate_password, validate_username, UserValidationError,
    MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH,
};

#[cfg(test)]
pub use repository::MockUserRepository;

/// Number of accounts shown on the leaderboard
pub const LEADERBOARD_LIMIT: usize = 20;
