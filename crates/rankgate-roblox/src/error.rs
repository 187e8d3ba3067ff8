//! Roblox adapter error types.

use thiserror::Error;

/// Errors returned by the Roblox platform adapter.
///
/// Session invalidity is a structured variant decided at the adapter
/// boundary, so callers match on [`RobloxError::SessionInvalid`] instead of
/// inspecting message text.
#[derive(Debug, Error)]
pub enum RobloxError {
    // ── Session & authentication ─────────────────────────────────────────────

    /// The platform rejected the held session/request token.
    #[error("session is no longer valid")]
    SessionInvalid,

    /// Login or self-identity check failed; the session stays unauthenticated.
    #[error("authentication failed: {0}")]
    Authentication(String),

    // ── Resolution failures ──────────────────────────────────────────────────

    #[error("group has no role with id {0}")]
    RoleNotFound(u64),

    #[error("group has no role with rank {0}")]
    RankNotFound(u8),

    #[error("no user named '{0}'")]
    UserNotFound(String),

    // ── Remote communication ─────────────────────────────────────────────────

    #[error("Roblox API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error communicating with Roblox: {0}")]
    Http(String),

    #[error("unexpected response from Roblox: {0}")]
    UnexpectedResponse(String),
}

impl RobloxError {
    /// True when re-login may recover the operation.
    pub fn is_session_invalid(&self) -> bool {
        matches!(self, RobloxError::SessionInvalid)
    }
}

impl From<reqwest::Error> for RobloxError {
    fn from(e: reqwest::Error) -> Self {
        RobloxError::Http(e.to_string())
    }
}
