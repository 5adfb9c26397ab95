//! Request and response payloads for the collector HTTP contract.

use serde::{Deserialize, Serialize};
use trace_soak_shared::types::{Actor, Credentials};

/// Account prefix the collector files sign-ups under.
pub const SIGNUP_PREFIX: &str = "gleaner";

/// Body of `POST api/signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub role: String,
    pub prefix: String,
}

impl SignUpRequest {
    /// Build a sign-up request from account credentials; the email is derived
    /// from the username and the prefix is fixed.
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self {
            username: credentials.username.clone(),
            password: credentials.password.clone(),
            email: credentials.email(),
            role: credentials.role.clone(),
            prefix: SIGNUP_PREFIX.to_string(),
        }
    }
}

/// Response of `POST api/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: LoginUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    pub token: String,
}

impl LoginResponse {
    /// The bearer credential expected by authenticated collector endpoints.
    pub fn bearer_token(&self) -> String {
        format!("Bearer {}", self.user.token)
    }
}

/// Response of resource-creation calls that return only an identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedResource {
    #[serde(rename = "_id")]
    pub id: String,
}

/// Response of `POST .../games/{id}/versions`.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "trackingCode")]
    pub tracking_code: String,
}

/// Response of `POST .../collector/start/{trackingCode}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StartResponse {
    #[serde(rename = "authToken")]
    pub auth_token: String,
    /// Canonical actor descriptor the collector assigned to this session.
    #[serde(default)]
    pub actor: Option<Actor>,
}

/// Which trackable resource a session-control call addresses. The collector
/// exposes the same update/start operations under two resource families,
/// depending on the protocol variant in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartTarget {
    Session,
    Activity,
}

impl StartTarget {
    /// URL path segment for this resource family.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Session => "sessions",
            Self::Activity => "activities",
        }
    }
}
