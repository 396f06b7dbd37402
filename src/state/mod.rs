//! Observable state stores backing the panel UI.
//!
//! DESIGN
//! ======
//! State is split by domain (`session`, `translations`, `user_config`) so
//! UI components can subscribe to small focused models. Stores are plain
//! objects constructed once at application start and handed to consumers;
//! there is no implicit global instance.

pub mod session;
pub mod translations;
pub mod user_config;
