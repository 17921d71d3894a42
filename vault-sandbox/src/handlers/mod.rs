//! HTTP handlers for vault-sandbox.

pub mod aliases;
pub mod health;

pub use health::{health_check, readiness_check};
