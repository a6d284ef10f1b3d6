//! User infrastructure module
//!
//! Password hashing with Argon2, the SQLite and in-memory repositories,
//! and the user service used by the HTTP layer.

mod password;
mod repository;
mod service;
mod sqlite_repository;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::InMemoryUserRepository;
pub use service::{SignupRequest, UserService};
pub use sqlite_repository::SqliteUserRepository;
