//! Wire types for the Roblox web API.

use serde::{Deserialize, Serialize};

/// A role in the group's rank ladder.
///
/// `rank` is the 0–255 level. Rank 0 is the "Guest" tier the platform
/// reports for non-members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: u64,
    pub name: String,
    pub rank: u8,
}

/// Envelope for `GET groups/v1/groups/{groupId}/roles`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroupRoles {
    pub roles: Vec<Role>,
}

/// Response for `GET users/v1/users/authenticated`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticatedUser {
    pub id: u64,
    pub name: String,
}

/// One entry of the platform's `{"errors":[{code,message}]}` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEntry {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub errors: Vec<ApiErrorEntry>,
}

/// Response for `POST users/v1/usernames/users`.
#[derive(Debug, Deserialize)]
pub(crate) struct UsernameLookup {
    pub data: Vec<UsernameMatch>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsernameMatch {
    pub id: u64,
}
