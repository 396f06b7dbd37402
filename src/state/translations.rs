//! Translation store — lazily loads locale bundles for the panel UI.
//!
//! Not a state machine; a loader keyed by language code. A failed load for
//! a non-default language silently falls back to the default bundle so the
//! UI always has something to render; only a failure of the default
//! language itself surfaces as an error, and prior translations are kept
//! in that case.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::error;

use crate::i18n::{BundleLoader, DEFAULT_LANGUAGE, I18nError, TranslationBundle};
use crate::state::user_config::UserConfig;
use crate::store::{Store, Subscription};

// =============================================================================
// STATE
// =============================================================================

/// Observable translation snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationState {
    pub translations: Option<TranslationBundle>,
    pub is_loading: bool,
    pub error: Option<String>,
}

// =============================================================================
// STORE
// =============================================================================

/// Observable locale-bundle loader over a [`BundleLoader`] and a
/// [`UserConfig`] collaborator.
pub struct TranslationStore {
    store: Store<TranslationState>,
    loader: Arc<dyn BundleLoader>,
    config: Arc<dyn UserConfig>,
    current_language: Mutex<String>,
}

impl TranslationStore {
    #[must_use]
    pub fn new(loader: Arc<dyn BundleLoader>, config: Arc<dyn UserConfig>) -> Self {
        Self {
            store: Store::new(TranslationState::default()),
            loader,
            config,
            current_language: Mutex::new(DEFAULT_LANGUAGE.to_string()),
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> TranslationState {
        self.store.get()
    }

    /// Push the current snapshot immediately, then on every mutation.
    pub fn subscribe(
        &self,
        callback: impl Fn(&TranslationState) + Send + Sync + 'static,
    ) -> Subscription<TranslationState> {
        self.store.subscribe(callback)
    }

    /// Load the bundle for `language`, falling back to the default language
    /// when the requested one is unavailable.
    ///
    /// On success the requested code is recorded as current language even
    /// when the fallback bundle was served; a later retry for that code can
    /// pick up its real bundle.
    pub async fn load_language(&self, language: &str) {
        self.store.update(|s| {
            s.is_loading = true;
            s.error = None;
        });

        match self.fetch(language).await {
            Ok(bundle) => {
                *self.current_language_lock() = language.to_string();
                self.store.update(|s| {
                    s.translations = Some(bundle);
                    s.is_loading = false;
                    s.error = None;
                });
            }
            Err(err) => {
                self.store.update(|s| {
                    s.is_loading = false;
                    s.error = Some(format!("Failed to load translations: {err}"));
                });
            }
        }
    }

    /// Load the language from the user-configuration snapshot.
    pub async fn init(&self) {
        let language = self.config.snapshot().language;
        self.load_language(&language).await;
    }

    /// The last successfully loaded language code (the default code if
    /// nothing was ever loaded).
    #[must_use]
    pub fn current_language(&self) -> String {
        self.current_language_lock().clone()
    }

    async fn fetch(&self, language: &str) -> Result<TranslationBundle, I18nError> {
        match self.loader.load(language).await {
            Ok(bundle) => Ok(bundle),
            Err(err) => {
                error!(language, error = %err, "failed to load translation bundle");
                if language == DEFAULT_LANGUAGE {
                    Err(err)
                } else {
                    self.loader.load(DEFAULT_LANGUAGE).await
                }
            }
        }
    }

    fn current_language_lock(&self) -> std::sync::MutexGuard<'_, String> {
        self.current_language.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "translations_test.rs"]
mod tests;
