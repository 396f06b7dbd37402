use super::*;

fn bundle(json: &str) -> TranslationBundle {
    TranslationBundle::parse("test", json.as_bytes()).unwrap()
}

// =========================================================================
// TranslationBundle lookup
// =========================================================================

#[test]
fn get_resolves_dot_paths() {
    let b = bundle(r#"{ "login": { "accessDenied": "denied" } }"#);
    assert_eq!(b.get("login.accessDenied"), Some("denied"));
}

#[test]
fn get_returns_none_for_missing_key() {
    let b = bundle(r#"{ "login": {} }"#);
    assert!(b.get("login.accessDenied").is_none());
    assert!(b.get("nope").is_none());
}

#[test]
fn get_returns_none_for_non_string_leaf() {
    let b = bundle(r#"{ "login": { "count": 3 } }"#);
    assert!(b.get("login.count").is_none());
    assert!(b.get("login").is_none());
}

#[test]
fn text_marks_missing_keys() {
    let b = bundle(r#"{ "common": { "signIn": "Sign in" } }"#);
    assert_eq!(b.text("common.signIn"), "Sign in");
    assert_eq!(b.text("common.signOut"), "MISSING: common.signOut");
}

#[test]
fn default_bundle_has_no_keys() {
    let b = TranslationBundle::default();
    assert_eq!(b.text("common.signIn"), "MISSING: common.signIn");
}

// =========================================================================
// Parsing
// =========================================================================

#[test]
fn parse_rejects_invalid_json() {
    let err = TranslationBundle::parse("en", b"not json").unwrap_err();
    assert!(matches!(err, I18nError::Parse { .. }));
}

#[test]
fn parse_rejects_non_object_top_level() {
    let err = TranslationBundle::parse("en", b"[1, 2]").unwrap_err();
    assert!(matches!(err, I18nError::Parse { .. }));
}

// =========================================================================
// EmbeddedBundleLoader
// =========================================================================

#[tokio::test]
async fn embedded_loader_serves_default_language() {
    let b = EmbeddedBundleLoader.load(DEFAULT_LANGUAGE).await.unwrap();
    assert_eq!(b.get("login.accessDenied"), Some("Access denied: This panel is only for administrators"));
}

#[tokio::test]
async fn embedded_loader_serves_french() {
    let b = EmbeddedBundleLoader.load("fr").await.unwrap();
    assert_eq!(b.text("theme.dark"), "Sombre");
}

#[tokio::test]
async fn embedded_loader_rejects_unknown_language() {
    let err = EmbeddedBundleLoader.load("xx").await.unwrap_err();
    assert!(matches!(err, I18nError::UnknownLanguage(code) if code == "xx"));
}

#[test]
fn available_languages_lists_embedded_codes() {
    let languages = EmbeddedBundleLoader::available_languages();
    assert_eq!(languages, vec!["en".to_string(), "fr".to_string()]);
}
