//! Locale bundles — per-language key→string maps for the panel UI.
//!
//! DESIGN
//! ======
//! Bundles are JSON objects embedded at compile time from
//! `assets/translations/<code>.json` and treated as opaque nested maps;
//! the UI looks strings up by dot path (`"login.accessDenied"`). A missing
//! key renders as a `MISSING:` marker so untranslated strings show up in
//! the UI instead of disappearing. Loading goes through the [`BundleLoader`]
//! trait so state code can be tested against in-memory bundles.

use rust_embed::RustEmbed;
use serde_json::Value;

/// Language code used when nothing was ever loaded and as the fallback
/// target for failed loads.
pub const DEFAULT_LANGUAGE: &str = "en";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced when resolving a language code to a bundle.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    /// No bundle exists for the requested language code.
    #[error("no translation bundle for language '{0}'")]
    UnknownLanguage(String),

    /// The bundle exists but is not a valid JSON object.
    #[error("translation bundle for '{language}' is malformed: {detail}")]
    Parse { language: String, detail: String },
}

// =============================================================================
// BUNDLE
// =============================================================================

/// An opaque, read-only set of display strings for one language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationBundle(Value);

impl TranslationBundle {
    pub(crate) fn parse(language: &str, raw: &[u8]) -> Result<Self, I18nError> {
        let value: Value = serde_json::from_slice(raw).map_err(|e| I18nError::Parse {
            language: language.to_string(),
            detail: e.to_string(),
        })?;
        if !value.is_object() {
            return Err(I18nError::Parse {
                language: language.to_string(),
                detail: "top level is not an object".to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Look a string up by dot path, e.g. `"common.signIn"`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let mut node = &self.0;
        for segment in key.split('.') {
            node = node.get(segment)?;
        }
        node.as_str()
    }

    /// Like [`get`](Self::get), but renders missing keys as a visible
    /// `MISSING: <key>` marker.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        self.get(key).map_or_else(|| format!("MISSING: {key}"), str::to_string)
    }
}

// =============================================================================
// LOADER
// =============================================================================

/// Resolves a language code to its bundle. Enables mocking in tests.
#[async_trait::async_trait]
pub trait BundleLoader: Send + Sync {
    /// Fetch the bundle for `language`.
    ///
    /// # Errors
    ///
    /// Returns an [`I18nError`] if the language is unknown or its bundle is
    /// malformed.
    async fn load(&self, language: &str) -> Result<TranslationBundle, I18nError>;
}

#[derive(RustEmbed)]
#[folder = "assets/translations/"]
struct Assets;

/// [`BundleLoader`] over the bundles compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedBundleLoader;

impl EmbeddedBundleLoader {
    /// Language codes with an embedded bundle.
    #[must_use]
    pub fn available_languages() -> Vec<String> {
        let mut languages: Vec<String> = Assets::iter()
            .filter_map(|file| file.as_ref().strip_suffix(".json").map(str::to_string))
            .collect();
        languages.sort();
        languages
    }
}

#[async_trait::async_trait]
impl BundleLoader for EmbeddedBundleLoader {
    async fn load(&self, language: &str) -> Result<TranslationBundle, I18nError> {
        let file = Assets::get(&format!("{language}.json"))
            .ok_or_else(|| I18nError::UnknownLanguage(language.to_string()))?;
        TranslationBundle::parse(language, file.data.as_ref())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
