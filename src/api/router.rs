use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth;
use super::focus;
use super::health;
use super::middleware::{
    logging_middleware, require_api_session, require_session, security_headers_middleware,
};
use super::pages;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    let pages = pages::create_pages_router()
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    let api = focus::create_focus_router()
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_session));

    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Public form pages
        .merge(auth::create_auth_router())
        // Session-guarded pages and JSON API
        .merge(pages)
        .nest("/api", api)
        .with_state(state)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
