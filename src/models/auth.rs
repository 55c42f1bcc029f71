//! Authentication-related models

use super::user::UserResponse;
use serde::{Deserialize, Serialize};

/// Login request
///
/// Both fields are optional at the wire level so that a missing field reaches
/// the service's presence check instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub status: u16,
    pub access_token: String,
}

/// Self-lookup response
#[derive(Debug, Serialize)]
pub struct UserLookupResponse {
    pub status: u16,
    pub user: UserResponse,
}
