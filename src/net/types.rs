//! Auth wire types and errors shared by the API client and session state.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by auth API calls. `Display` is the user-facing message
/// that ends up in session state.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request could not be sent or completed.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status; `message` is the
    /// server-provided error body when it had one.
    #[error("{message}")]
    Response { status: u16, message: String },

    /// The response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

// =============================================================================
// ROLES
// =============================================================================

/// Panel user role. `User` is the lowest-privilege tier and the only one the
/// role gate rejects; any other name the server sends (including ones added
/// after this client shipped) maps to `Other` and is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Root,
    Admin,
    User,
    #[serde(other)]
    Other,
}

impl Role {
    /// Whether this role passes the administrators-only gate.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        !matches!(self, Self::User)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Authenticated panel user as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Credentials posted to `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(rename = "rememberMe", default)]
    pub remember_me: bool,
}

/// Body shape shared by the login and verify endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
