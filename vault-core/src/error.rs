use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while configuring or calling the vault aliases API.
///
/// Remote failures are classified by the HTTP status the vault reports.
/// Callers that only care whether a request failed can treat every variant
/// the same way.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Remote request failed ({status}): {message}")]
    RemoteRequest { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<config::ConfigError> for VaultError {
    fn from(err: config::ConfigError) -> Self {
        VaultError::Config(err.to_string())
    }
}

impl VaultError {
    /// Classify a non-success response from the vault.
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                VaultError::InvalidRequest(message)
            }
            StatusCode::UNAUTHORIZED => VaultError::Unauthorized(message),
            StatusCode::FORBIDDEN => VaultError::Forbidden(message),
            StatusCode::NOT_FOUND => VaultError::NotFound(message),
            other => VaultError::RemoteRequest {
                status: other.as_u16(),
                message,
            },
        }
    }

    /// HTTP status associated with this error, as the vault would report it.
    pub fn status(&self) -> StatusCode {
        match self {
            VaultError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            VaultError::Validation(_) | VaultError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            VaultError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            VaultError::Forbidden(_) => StatusCode::FORBIDDEN,
            VaultError::NotFound(_) => StatusCode::NOT_FOUND,
            VaultError::RemoteRequest { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            VaultError::Transport(err) => err.status().unwrap_or(StatusCode::BAD_GATEWAY),
            VaultError::Decode(_) | VaultError::UnexpectedResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, VaultError::NotFound(_))
    }

    /// Message without the variant prefix, as carried in a vault error body.
    pub fn detail(&self) -> String {
        match self {
            VaultError::Config(msg)
            | VaultError::InvalidRequest(msg)
            | VaultError::Unauthorized(msg)
            | VaultError::Forbidden(msg)
            | VaultError::NotFound(msg)
            | VaultError::UnexpectedResponse(msg)
            | VaultError::RemoteRequest { message: msg, .. } => msg.clone(),
            other => other.to_string(),
        }
    }
}
