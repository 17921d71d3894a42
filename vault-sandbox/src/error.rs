//! Rendering of vault errors as HTTP responses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use vault_core::aliases::ErrorEnvelope;
use vault_core::VaultError;

/// Handler error rendered with the vault's `{"errors": [...]}` body.
#[derive(Debug)]
pub struct ApiError(pub VaultError);

impl From<VaultError> for ApiError {
    fn from(err: VaultError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let title = status.canonical_reason().unwrap_or("Error");

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self.0, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self.0, "Request rejected");
        }

        (
            status,
            Json(ErrorEnvelope::single(status.as_u16(), title, self.0.detail())),
        )
            .into_response()
    }
}
