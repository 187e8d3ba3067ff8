//! Role listing.

use axum::{Json, Router, extract::State, routing::get};
use rankgate_common::error::{ApiError, ApiResult};
use rankgate_roblox::with_retry;
use serde_json::{Value, json};

use crate::AppState;

/// Role listing router.
pub fn router() -> Router<AppState> {
    Router::new().route("/ranks", get(list_ranks))
}

/// GET /ranks — the group's role ladder, fetched fresh from the platform.
/// The rank-0 guest tier is dropped while the filter policy is on.
async fn list_ranks(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let roles = with_retry(&state.session, || state.roblox.group_roles())
        .await
        .map_err(|e| ApiError::operation("ranks_failed", e))?;

    let roles: Vec<_> = roles
        .into_iter()
        .filter(|role| !state.filter_guest_role || role.rank > 0)
        .collect();

    Ok(Json(json!({ "roles": roles })))
}
