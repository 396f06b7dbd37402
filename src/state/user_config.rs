//! User configuration collaborator — language and theme preferences.
//!
//! The session store initializes per-user configuration after login and the
//! translation store reads the language preference at startup; both go
//! through the [`UserConfig`] trait. The in-memory [`UserConfigStore`] is
//! the reference implementation; persistence is deployment-specific and
//! stays behind the trait.

use serde::{Deserialize, Serialize};

use crate::i18n::DEFAULT_LANGUAGE;
use crate::store::{Store, Subscription};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by user-configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Post-login configuration initialization failed.
    #[error("user config initialization failed: {0}")]
    Init(String),
}

// =============================================================================
// STATE
// =============================================================================

/// UI color theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Current user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfigState {
    pub language: String,
    pub theme: Theme,
}

impl Default for UserConfigState {
    fn default() -> Self {
        Self { language: DEFAULT_LANGUAGE.to_string(), theme: Theme::System }
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Contract consumed by the session and translation stores. Enables mocking
/// in tests.
#[async_trait::async_trait]
pub trait UserConfig: Send + Sync {
    /// Point-in-time snapshot of the current preferences (not a live
    /// subscription).
    fn snapshot(&self) -> UserConfigState;

    /// Load per-user configuration after a successful login.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration could not be
    /// initialized.
    async fn initialize_user_config(&self) -> Result<(), ConfigError>;
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Observable in-memory [`UserConfig`] implementation.
pub struct UserConfigStore {
    store: Store<UserConfigState>,
}

impl Default for UserConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(UserConfigState::default())
    }

    #[must_use]
    pub fn with_state(initial: UserConfigState) -> Self {
        Self { store: Store::new(initial) }
    }

    /// Push the current preferences immediately, then on every change.
    pub fn subscribe(
        &self,
        callback: impl Fn(&UserConfigState) + Send + Sync + 'static,
    ) -> Subscription<UserConfigState> {
        self.store.subscribe(callback)
    }

    pub fn set_language(&self, language: impl Into<String>) {
        let language = language.into();
        self.store.update(|s| s.language = language);
    }

    pub fn set_theme(&self, theme: Theme) {
        self.store.update(|s| s.theme = theme);
    }
}

#[async_trait::async_trait]
impl UserConfig for UserConfigStore {
    fn snapshot(&self) -> UserConfigState {
        self.store.get()
    }

    async fn initialize_user_config(&self) -> Result<(), ConfigError> {
        // Nothing to fetch in memory; republish so subscribers observe the
        // post-login snapshot.
        self.store.update(|_| {});
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_config_test.rs"]
mod tests;
