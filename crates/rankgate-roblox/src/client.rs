//! Roblox web API client.
//!
//! The [`RobloxClient`] performs all outbound calls to the Roblox group and
//! user APIs on behalf of the configured bot account. Authentication is the
//! account's long-lived `.ROBLOSECURITY` cookie plus a rotating request
//! token (`x-csrf-token`) that the platform issues on demand and rejects
//! when stale.
//!
//! Error classification happens here, at the adapter boundary: a response
//! matching the platform's token-rejection pattern becomes
//! [`RobloxError::SessionInvalid`]; every other failure keeps its status and
//! message in [`RobloxError::Api`].

use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode, header};
use serde_json::{Value, json};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    error::RobloxError,
    types::{ApiErrorEnvelope, AuthenticatedUser, GroupRoles, Role, UsernameLookup},
};

/// Header carrying the rotating request token.
const CSRF_HEADER: &str = "x-csrf-token";

// ─── Endpoints ───────────────────────────────────────────────────────────────

/// Base URLs for the Roblox API hosts. Overridable so tests can point the
/// client at a local mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub users: String,
    pub groups: String,
    pub auth: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            users: "https://users.roblox.com".into(),
            groups: "https://groups.roblox.com".into(),
            auth: "https://auth.roblox.com".into(),
        }
    }
}

impl Endpoints {
    /// Point every host at one base URL (a mock server serves all paths).
    pub fn single(base: impl Into<String>) -> Self {
        let base = base.into();
        Self { users: base.clone(), groups: base.clone(), auth: base }
    }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async HTTP client for the Roblox group-management API.
pub struct RobloxClient {
    http: Client,
    cookie: String,
    group_id: u64,
    endpoints: Endpoints,
    /// Current request token. Rotated whenever the platform hands out a
    /// replacement, cleared when a rejection arrives without one.
    csrf: RwLock<Option<String>>,
}

impl RobloxClient {
    /// Create a client for `group_id` authenticating with the given
    /// `.ROBLOSECURITY` cookie value.
    pub fn new(cookie: impl Into<String>, group_id: u64) -> Self {
        Self::with_endpoints(cookie, group_id, Endpoints::default())
    }

    pub fn with_endpoints(cookie: impl Into<String>, group_id: u64, endpoints: Endpoints) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("rankgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build reqwest client");

        Self {
            http,
            cookie: cookie.into(),
            group_id,
            endpoints,
            csrf: RwLock::new(None),
        }
    }

    /// The group this client manages.
    pub fn group_id(&self) -> u64 {
        self.group_id
    }

    // ── Authentication ───────────────────────────────────────────────────────

    /// Make sure a request token is held, harvesting one if not.
    ///
    /// The platform hands out tokens on any token-less POST: the request is
    /// rejected and the replacement arrives in the `x-csrf-token` response
    /// header. `POST auth/v2/logout` is the conventional endpoint for this.
    pub async fn ensure_csrf(&self) -> Result<(), RobloxError> {
        if self.csrf.read().await.is_some() {
            return Ok(());
        }

        let url = format!("{}/v2/logout", self.endpoints.auth);
        let resp = self
            .http
            .post(&url)
            .header(header::COOKIE, self.cookie_header())
            .send()
            .await?;

        match header_value(&resp, CSRF_HEADER) {
            Some(token) => {
                *self.csrf.write().await = Some(token);
                Ok(())
            }
            None => Err(RobloxError::Authentication(
                "platform did not issue a request token".into(),
            )),
        }
    }

    /// Self-identity check: who does the platform think this cookie is?
    pub async fn authenticated_user(&self) -> Result<AuthenticatedUser, RobloxError> {
        let url = format!("{}/v1/users/authenticated", self.endpoints.users);
        let resp = self
            .http
            .get(&url)
            .header(header::COOKIE, self.cookie_header())
            .send()
            .await?;

        if resp.status() == StatusCode::UNAUTHORIZED {
            return Err(RobloxError::Authentication(
                "cookie was not accepted by the platform".into(),
            ));
        }
        let resp = self.check_status(resp).await?;
        decode(resp).await
    }

    // ── Group operations ─────────────────────────────────────────────────────

    /// Fetch the group's role ladder, fresh from the platform.
    pub async fn group_roles(&self) -> Result<Vec<Role>, RobloxError> {
        let url = format!("{}/v1/groups/{}/roles", self.endpoints.groups, self.group_id);
        let resp = self
            .http
            .get(&url)
            .header(header::COOKIE, self.cookie_header())
            .send()
            .await?;
        let resp = self.check_status(resp).await?;
        let body: GroupRoles = decode(resp).await?;
        Ok(body.roles)
    }

    /// Move a member onto the given role.
    pub async fn set_member_role(&self, user_id: u64, role_id: u64) -> Result<(), RobloxError> {
        let url =
            format!("{}/v1/groups/{}/users/{}", self.endpoints.groups, self.group_id, user_id);
        self.execute(Method::PATCH, &url, Some(json!({ "roleId": role_id }))).await?;
        Ok(())
    }

    /// Exile a member from the group.
    pub async fn exile(&self, user_id: u64) -> Result<(), RobloxError> {
        let url =
            format!("{}/v1/groups/{}/users/{}", self.endpoints.groups, self.group_id, user_id);
        self.execute(Method::DELETE, &url, None).await?;
        Ok(())
    }

    /// Accept a pending join request for `user_id`.
    pub async fn accept_join_request(&self, user_id: u64) -> Result<(), RobloxError> {
        let url = format!(
            "{}/v1/groups/{}/join-requests/users/{}",
            self.endpoints.groups, self.group_id, user_id
        );
        self.execute(Method::POST, &url, None).await?;
        Ok(())
    }

    // ── User lookup ──────────────────────────────────────────────────────────

    /// Resolve a username to its numeric user id.
    pub async fn user_id_from_username(&self, username: &str) -> Result<u64, RobloxError> {
        let url = format!("{}/v1/usernames/users", self.endpoints.users);
        let body = json!({ "usernames": [username], "excludeBannedUsers": false });
        let resp = self.execute(Method::POST, &url, Some(body)).await?;
        let lookup: UsernameLookup = decode(resp).await?;
        lookup
            .data
            .first()
            .map(|m| m.id)
            .ok_or_else(|| RobloxError::UserNotFound(username.to_owned()))
    }

    // ── Request plumbing ─────────────────────────────────────────────────────

    fn cookie_header(&self) -> String {
        format!(".ROBLOSECURITY={}", self.cookie)
    }

    /// Send a state-changing request with the cookie and current request
    /// token attached.
    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> Result<Response, RobloxError> {
        debug!(%method, url, "roblox request");
        let mut req =
            self.http.request(method, url).header(header::COOKIE, self.cookie_header());
        if let Some(token) = self.csrf.read().await.clone() {
            req = req.header(CSRF_HEADER, token);
        }
        let req = match body {
            Some(ref b) => req.json(b),
            None => req,
        };
        let resp = req.send().await?;
        self.check_status(resp).await
    }

    /// Classify a non-success response. A 403 carrying the platform's
    /// token-rejection signal (a rotated token header, or the rejection
    /// message) means the session is invalid. A rotated token is kept for
    /// the next attempt; without one, the stale token is dropped so the
    /// next login harvests a fresh one.
    async fn check_status(&self, resp: Response) -> Result<Response, RobloxError> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let rotated = header_value(&resp, CSRF_HEADER);
        let message = error_message(resp).await;

        if status == StatusCode::FORBIDDEN
            && (rotated.is_some() || message.to_lowercase().contains("token validation failed"))
        {
            *self.csrf.write().await = rotated;
            return Err(RobloxError::SessionInvalid);
        }

        Err(RobloxError::Api { status: status.as_u16(), message })
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn header_value(resp: &Response, name: &str) -> Option<String> {
    resp.headers().get(name).and_then(|v| v.to_str().ok()).map(str::to_owned)
}

/// Extract the human-readable message from the platform's error envelope,
/// falling back to the raw body.
async fn error_message(resp: Response) -> String {
    let raw = resp.text().await.unwrap_or_default();
    serde_json::from_str::<ApiErrorEnvelope>(&raw)
        .ok()
        .and_then(|envelope| envelope.errors.into_iter().next())
        .map(|entry| entry.message)
        .unwrap_or(raw)
}

async fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, RobloxError> {
    resp.json::<T>().await.map_err(|e| RobloxError::UnexpectedResponse(e.to_string()))
}
