//! Auth API contract and HTTP implementation.

pub mod api;
pub mod types;
