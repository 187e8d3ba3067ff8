//! Access gate — the shared-secret check in front of every operation route.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use rankgate_common::error::ApiError;

use crate::AppState;

/// Header carrying the caller's shared secret.
pub const SECRET_HEADER: &str = "x-secret-key";

/// Reject any request that does not present the configured shared secret.
///
/// Runs before handler logic: a rejected request causes no remote call and
/// no session impact.
pub async fn require_secret(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(SECRET_HEADER)
        .and_then(|v| v.to_str().ok());

    if presented == Some(state.secret_key.as_str()) {
        return next.run(request).await;
    }

    ApiError::Unauthorized.into_response()
}
