//! Liveness probe — the one route exempt from the access gate.

use axum::{Json, Router, extract::State, routing::get};
use rankgate_common::error::{ApiError, ApiResult};
use serde_json::{Value, json};

use crate::AppState;

/// Health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check)).route("/health", get(health_check))
}

/// GET /health — opportunistically attempts authentication and reports the
/// outcome. Requires no secret.
async fn health_check(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    state
        .session
        .ensure_authenticated()
        .await
        .map_err(|e| ApiError::operation("auth_failed", e))?;

    Ok(Json(json!({ "ok": true, "groupId": state.roblox.group_id() })))
}
