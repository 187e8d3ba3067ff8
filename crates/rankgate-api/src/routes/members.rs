//! Membership mutations — rank changes, removal, join-request handling.
//!
//! Every handler validates its fields locally first (no remote calls), then
//! delegates one composed remote operation (or a short fixed sequence)
//! through the retry coordinator, then maps the outcome to a response. All
//! mutations are idempotent on the platform side, so a caller that loses a
//! response can safely re-invoke.

use axum::{Json, Router, extract::State, routing::post};
use axum_extra::extract::WithRejection;
use rankgate_common::error::{ApiError, ApiResult};
use rankgate_roblox::{RobloxError, with_retry};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::AppState;

/// Membership mutation routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/set-rank", post(set_rank))
        .route("/remove", post(remove_member))
        .route("/accept-join", post(accept_join))
        .route("/ensure-member-and-rank", post(ensure_member_and_rank))
}

// ─── Request bodies ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankRequest {
    roblox_id: Option<u64>,
    role_id: Option<u64>,
    rank_number: Option<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveRequest {
    roblox_id: Option<u64>,
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AcceptJoinRequest {
    roblox_id: Option<u64>,
}

/// The caller's rank target: an explicit rank number, or a role id to be
/// resolved against a fresh role list.
#[derive(Debug, Clone, Copy)]
enum RankTarget {
    Rank(u8),
    Role(u64),
}

impl RankRequest {
    /// Pure local validation. A role id wins when both targets are supplied.
    fn validate(&self) -> Result<(u64, RankTarget), ApiError> {
        let user_id = self.roblox_id.ok_or(ApiError::Validation("missing_robloxId"))?;
        let target = match (self.role_id, self.rank_number) {
            (Some(role_id), _) => RankTarget::Role(role_id),
            (None, Some(rank)) => RankTarget::Rank(rank),
            (None, None) => return Err(ApiError::Validation("missing_roleId_or_rankNumber")),
        };
        Ok((user_id, target))
    }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// POST /set-rank
async fn set_rank(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<RankRequest>, ApiError>,
) -> ApiResult<Json<Value>> {
    let (user_id, target) = body.validate()?;

    let applied = with_retry(&state.session, || apply_rank(&state, user_id, target))
        .await
        .map_err(|e| rank_failure("set_rank_failed", e))?;

    Ok(Json(json!({ "ok": true, "appliedRank": applied })))
}

/// POST /remove — exile a member, named by numeric id or by username
/// resolved as a pre-step.
async fn remove_member(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<RemoveRequest>, ApiError>,
) -> ApiResult<Json<Value>> {
    let target = match (body.roblox_id, body.username) {
        (Some(id), _) => MemberRef::Id(id),
        (None, Some(name)) if !name.trim().is_empty() => MemberRef::Name(name),
        _ => return Err(ApiError::Validation("missing_robloxId_or_username")),
    };

    let user_id = with_retry(&state.session, || async {
        let user_id = match &target {
            MemberRef::Id(id) => *id,
            MemberRef::Name(name) => state.roblox.user_id_from_username(name).await?,
        };
        state.roblox.exile(user_id).await?;
        Ok(user_id)
    })
    .await
    .map_err(|e| ApiError::operation("remove_failed", e))?;

    Ok(Json(json!({ "ok": true, "robloxId": user_id })))
}

/// POST /accept-join
async fn accept_join(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<AcceptJoinRequest>, ApiError>,
) -> ApiResult<Json<Value>> {
    let user_id = body.roblox_id.ok_or(ApiError::Validation("missing_robloxId"))?;

    with_retry(&state.session, || state.roblox.accept_join_request(user_id))
        .await
        .map_err(|e| ApiError::operation("accept_join_failed", e))?;

    Ok(Json(json!({ "ok": true })))
}

/// POST /ensure-member-and-rank — accept a pending join request if one
/// exists, then apply the requested rank.
///
/// The accept step is best-effort: failure normally means the user is
/// already a member or has no pending request, so the outcome is inspected,
/// logged, and discarded rather than surfaced.
async fn ensure_member_and_rank(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<RankRequest>, ApiError>,
) -> ApiResult<Json<Value>> {
    let (user_id, target) = body.validate()?;

    let accepted =
        with_retry(&state.session, || state.roblox.accept_join_request(user_id)).await;
    match accepted {
        Ok(()) => info!(user_id, "join request accepted"),
        Err(err) => info!(user_id, error = %err, "join request not accepted, continuing with rank application"),
    }

    let applied = with_retry(&state.session, || apply_rank(&state, user_id, target))
        .await
        .map_err(|e| rank_failure("ensure_member_rank_failed", e))?;

    Ok(Json(json!({ "ok": true, "appliedRank": applied })))
}

// ─── Rank application ────────────────────────────────────────────────────────

/// Resolve the target role from a fresh role list and apply it. The list is
/// fetched once and reused only within this invocation.
async fn apply_rank(state: &AppState, user_id: u64, target: RankTarget) -> Result<u8, RobloxError> {
    let roles = state.roblox.group_roles().await?;
    let role = match target {
        RankTarget::Role(role_id) => roles
            .iter()
            .find(|r| r.id == role_id)
            .ok_or(RobloxError::RoleNotFound(role_id))?,
        RankTarget::Rank(rank) => {
            roles.iter().find(|r| r.rank == rank).ok_or(RobloxError::RankNotFound(rank))?
        }
    };
    state.roblox.set_member_role(user_id, role.id).await?;
    Ok(role.rank)
}

/// An unresolvable role id is the caller's mistake; everything else that
/// escapes the retry coordinator is an operation failure.
fn rank_failure(code: &'static str, err: RobloxError) -> ApiError {
    match err {
        RobloxError::RoleNotFound(_) => ApiError::Validation("invalid_roleId"),
        other => ApiError::operation(code, other),
    }
}

enum MemberRef {
    Id(u64),
    Name(String),
}
