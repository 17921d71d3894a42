pub mod basic_auth;

pub use basic_auth::{require_basic_auth, BasicCredentials};
