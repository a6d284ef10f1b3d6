//! Authentication infrastructure module
//!
//! Signed session tokens identifying a logged-in user.

mod session;

pub use session::{JwtSessionService, SessionClaims, SessionTokenService};
