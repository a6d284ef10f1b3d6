//! API layer - HTTP endpoints and middleware

pub mod auth;
pub mod focus;
pub mod health;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod session;
pub mod state;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use router::create_router;
pub use session::SessionCookie;
pub use state::AppState;
