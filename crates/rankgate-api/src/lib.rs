//! # rankgate-api
//!
//! HTTP layer for rankgate. Builds the router: a secret-gated set of
//! group-management routes plus the one exempt liveness probe.

pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::{Router, middleware as axum_middleware};
use rankgate_roblox::{RobloxClient, Session};

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Platform adapter for the configured group.
    pub roblox: Arc<RobloxClient>,
    /// The process-wide session state for the bot account.
    pub session: Arc<Session>,
    /// Shared secret callers must present in `X-Secret-Key`.
    pub secret_key: String,
    /// Drop the rank-0 guest tier from `/ranks` listings.
    pub filter_guest_role: bool,
}

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let gated = Router::new()
        .merge(routes::ranks::router())
        .merge(routes::members::router())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_secret,
        ));

    Router::new()
        .merge(routes::health::router())
        .merge(gated)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
