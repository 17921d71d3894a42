//! HTTP basic authentication for the aliases routes.
//!
//! Clients authenticate exactly as they would against the hosted vault:
//! `Authorization: Basic base64(username:password)`.

use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::{header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use secrecy::ExposeSecret;
use subtle::ConstantTimeEq;
use vault_core::VaultError;

use crate::error::ApiError;
use crate::startup::AppState;

/// Credentials decoded from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Decode a `Basic <base64>` header value.
    pub fn parse(header_value: &str) -> Option<Self> {
        let encoded = header_value
            .strip_prefix("Basic ")
            .or_else(|| header_value.strip_prefix("basic "))?;
        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BasicCredentials
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(BasicCredentials::parse)
            .ok_or_else(|| {
                ApiError(VaultError::Unauthorized(
                    "Missing or malformed basic credentials".to_string(),
                ))
            })
    }
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Reject requests whose credentials do not match the sandbox configuration.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    credentials: BasicCredentials,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let username_ok = constant_time_eq(&credentials.username, &state.config.username);
    let password_ok = constant_time_eq(
        &credentials.password,
        state.config.password.expose_secret(),
    );

    if !(username_ok & password_ok) {
        tracing::warn!(username = %credentials.username, "Rejected invalid credentials");
        return Err(ApiError(VaultError::Unauthorized(
            "Invalid credentials".to_string(),
        )));
    }

    Ok(next.run(request).await)
}
