//! API middleware components

pub mod logging;
pub mod security;
pub mod session_guard;

pub use logging::logging_middleware;
pub use security::security_headers_middleware;
pub use session_guard::{
    current_user, require_api_session, require_session, session_user_id, SessionUser,
};
