//! Session store — client-side mirror of the server-authenticated identity.
//!
//! STATE MACHINE
//! =============
//! Anonymous → (login) authenticating → authenticated, or anonymous with an
//! error; authenticated → (logout) anonymous. `check_auth` re-synchronizes
//! with the server's session cookie at startup. The panel is
//! administrators-only: a login that authenticates a lowest-privilege user
//! is treated as a rejection, not a session.
//!
//! CONCURRENCY
//! ===========
//! Operations do not coordinate: two in-flight calls race and the last
//! completion wins. Call sites drive these sequentially from UI handlers.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::net::api::AuthApi;
use crate::net::types::{ApiError, AuthResponse, LoginRequest, User};
use crate::state::user_config::{ConfigError, UserConfig};
use crate::store::{Store, Subscription};

/// Error shown when an authenticated user fails the administrator role gate.
pub const ACCESS_DENIED: &str = "Access denied: This panel is only for administrators";

/// Success message the server sends for a fresh login.
const LOGIN_SUCCESS: &str = "Login successful";
/// Success message the server sends for an already-valid session.
const VERIFY_SUCCESS: &str = "Authentication verified";

const LOGIN_FAILED_FALLBACK: &str = "Login failed";
const NETWORK_ERROR_FALLBACK: &str = "Network error";

// =============================================================================
// STATE
// =============================================================================

/// Observable session snapshot.
///
/// Invariant: `is_authenticated` implies `user` is present and its role
/// passes [`Role::is_admin`](crate::net::types::Role::is_admin).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub is_loading: bool,
    pub error: Option<String>,
}

// =============================================================================
// ERROR
// =============================================================================

/// Failure modes of [`SessionStore::login`]. `Display` carries the same
/// string that was written to [`SessionState::error`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Authenticated successfully but the role gate rejected the user.
    #[error("{}", ACCESS_DENIED)]
    AccessDenied,

    /// The server reported a logical login failure.
    #[error("{0}")]
    Rejected(String),

    /// The API call itself failed.
    #[error("{0}")]
    Request(String),

    /// Post-login configuration initialization failed. The session itself
    /// is established and the store remains authenticated.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

// =============================================================================
// ROLE GATE
// =============================================================================

enum Verdict {
    /// Valid session for a user who passes the role gate.
    Granted(User),
    /// Valid session, but for a lowest-privilege user.
    Denied,
    /// Response does not describe a valid session.
    NoSession,
}

fn verdict(response: AuthResponse, accepted_messages: &[&str]) -> Verdict {
    match response.user {
        Some(user) if accepted_messages.contains(&response.message.as_str()) => {
            if user.role.is_admin() {
                Verdict::Granted(user)
            } else {
                Verdict::Denied
            }
        }
        _ => Verdict::NoSession,
    }
}

fn request_error_message(err: &ApiError) -> String {
    let message = err.to_string();
    if message.is_empty() { NETWORK_ERROR_FALLBACK.to_string() } else { message }
}

// =============================================================================
// STORE
// =============================================================================

/// Observable session state machine over an [`AuthApi`] and a
/// [`UserConfig`] collaborator.
pub struct SessionStore {
    store: Store<SessionState>,
    api: Arc<dyn AuthApi>,
    config: Arc<dyn UserConfig>,
}

impl SessionStore {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, config: Arc<dyn UserConfig>) -> Self {
        Self { store: Store::new(SessionState::default()), api, config }
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.store.get()
    }

    /// Push the current snapshot immediately, then on every mutation.
    pub fn subscribe(
        &self,
        callback: impl Fn(&SessionState) + Send + Sync + 'static,
    ) -> Subscription<SessionState> {
        self.store.subscribe(callback)
    }

    /// Authenticate against the backend and, on success, initialize the
    /// user's configuration.
    ///
    /// # Errors
    ///
    /// - [`SessionError::AccessDenied`] when the server authenticated a
    ///   lowest-privilege user; the store is left anonymous with the
    ///   access-denied error.
    /// - [`SessionError::Rejected`] / [`SessionError::Request`] for logical
    ///   and transport failures; the store is left anonymous with the
    ///   message as its error.
    /// - [`SessionError::Config`] when post-login configuration
    ///   initialization fails. The store stays authenticated and
    ///   `is_loading` stays cleared; only the caller sees this failure.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<(), SessionError> {
        self.store.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let response = match self.api.login(credentials).await {
            Ok(response) => response,
            Err(err) => {
                let message = request_error_message(&err);
                self.store.update(|s| {
                    s.is_loading = false;
                    s.error = Some(message.clone());
                });
                return Err(SessionError::Request(message));
            }
        };

        let server_message = response.message.clone();
        match verdict(response, &[LOGIN_SUCCESS]) {
            Verdict::Granted(user) => {
                self.store.update(|s| {
                    s.is_authenticated = true;
                    s.user = Some(user);
                    s.is_loading = false;
                    s.error = None;
                });
                self.config.initialize_user_config().await?;
                Ok(())
            }
            Verdict::Denied => {
                self.store.update(|s| {
                    s.is_authenticated = false;
                    s.user = None;
                    s.is_loading = false;
                    s.error = Some(ACCESS_DENIED.to_string());
                });
                Err(SessionError::AccessDenied)
            }
            Verdict::NoSession => {
                let message = if server_message.is_empty() {
                    LOGIN_FAILED_FALLBACK.to_string()
                } else {
                    server_message
                };
                self.store.update(|s| {
                    s.is_loading = false;
                    s.error = Some(message.clone());
                });
                Err(SessionError::Rejected(message))
            }
        }
    }

    /// End the session. Local state is always cleared to the anonymous
    /// shape; a failing logout endpoint must not block client-side
    /// sign-out.
    pub async fn logout(&self) {
        self.store.update(|s| s.is_loading = true);

        if let Err(err) = self.api.logout().await {
            warn!(error = %err, "logout API call failed");
        }

        self.store.set(SessionState::default());
    }

    /// Verify the current session cookie with the server.
    ///
    /// A response that does not prove a valid session, and any transport
    /// failure, clears to anonymous with no error: verification failure
    /// means "not logged in", not something to report.
    pub async fn check_auth(&self) {
        self.store.update(|s| s.is_loading = true);

        match self.api.verify().await {
            Ok(response) => {
                debug!(message = %response.message, has_user = response.user.is_some(), "auth verification response");
                match verdict(response, &[LOGIN_SUCCESS, VERIFY_SUCCESS]) {
                    Verdict::Granted(user) => self.store.update(|s| {
                        s.is_authenticated = true;
                        s.user = Some(user);
                        s.is_loading = false;
                        s.error = None;
                    }),
                    Verdict::Denied => self.store.update(|s| {
                        s.is_authenticated = false;
                        s.user = None;
                        s.is_loading = false;
                        s.error = Some(ACCESS_DENIED.to_string());
                    }),
                    Verdict::NoSession => self.store.set(SessionState::default()),
                }
            }
            Err(_) => self.store.set(SessionState::default()),
        }
    }

    /// Clear the error string; no other effect.
    pub fn clear_error(&self) {
        self.store.update(|s| s.error = None);
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
