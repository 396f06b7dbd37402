//! Auth API client — login, logout, session verification.
//!
//! Thin HTTP wrapper over the panel backend's `/api/auth` endpoints. The
//! session token rides on a cookie, so the client keeps a cookie store.
//! Pure parsing in `parse_auth_response` for testability.

use super::types::{ApiError, AuthResponse, LoginRequest};
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// AUTH API TRAIT
// =============================================================================

/// Async contract with the auth backend. Enables mocking in tests.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /api/auth/login` with credentials.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails, the server answers with
    /// a non-success status, or the body is malformed.
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError>;

    /// `POST /api/auth/logout`, invalidating the server-side session.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the server answers
    /// with a non-success status.
    async fn logout(&self) -> Result<(), ApiError>;

    /// `GET /api/auth/verify`, checking the current session cookie.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails, the server answers with
    /// a non-success status, or the body is malformed.
    async fn verify(&self) -> Result<AuthResponse, ApiError>;
}

// =============================================================================
// CLIENT
// =============================================================================

/// Reqwest-backed [`AuthApi`] implementation.
pub struct HttpAuthApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    /// Build a client for the given backend base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/api/auth/login"))
            .json(credentials)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;
        parse_auth_response(status, &text)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint("/api/auth/logout"))
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        if !is_success(status) {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Response { status, message: error_message(status, &body) });
        }
        Ok(())
    }

    async fn verify(&self) -> Result<AuthResponse, ApiError> {
        let response = self
            .http
            .get(self.endpoint("/api/auth/verify"))
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;
        parse_auth_response(status, &text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Best-effort extraction of the server's error message from a failure body.
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("server error: status {status}"))
}

fn parse_auth_response(status: u16, body: &str) -> Result<AuthResponse, ApiError> {
    if !is_success(status) {
        return Err(ApiError::Response { status, message: error_message(status, body) });
    }
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
