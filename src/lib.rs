//! # panel-client
//!
//! Client-side session and localization state for the admin panel.
//!
//! Two independent observable stores back the panel UI: [`state::session`]
//! mirrors the server-authenticated identity (with an administrator-only
//! role gate), and [`state::translations`] lazily loads locale bundles keyed
//! by the user's language preference. Both are thin wrappers over
//! [`store::Store`]; all real work is delegated to collaborator traits
//! (`AuthApi`, `UserConfig`, `BundleLoader`) so the stores stay mockable and
//! runtime-agnostic.

pub mod i18n;
pub mod net;
pub mod state;
pub mod store;

pub use store::{Store, Subscription};
