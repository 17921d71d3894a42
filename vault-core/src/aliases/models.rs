//! Aliases API data model and wire envelopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::VaultError;

/// How the vault represents the token issued for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AliasFormat {
    /// Generic identifier, e.g. `tok_sandbox_bhtsCwFUzoJMw9rWUfEV5e`.
    Uuid,
    RawUuid,
    /// Partial format preserving token for card numbers.
    Pfpt,
    FpeAccNumTFour,
    FpeAlphanumericAccNumTFour,
    FpeSixTFour,
    FpeSsnTFour,
    FpeTFour,
    NumLengthPreserving,
    GenericTFour,
    AlphanumericSixTFour,
    VgsFixedLenGeneric,
}

/// Retention of the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageMode {
    #[default]
    Persistent,
    Volatile,
}

/// One item of a redact batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AliasRequest {
    pub format: AliasFormat,
    #[validate(length(min = 1, message = "value must not be empty"))]
    pub value: String,
    #[serde(default)]
    pub classifiers: Vec<String>,
    /// Omitted from the wire when unset; the vault then stores persistently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageMode>,
}

impl AliasRequest {
    pub fn new(format: AliasFormat, value: impl Into<String>) -> Self {
        Self {
            format,
            value: value.into(),
            classifiers: Vec::new(),
            storage: None,
        }
    }

    pub fn with_classifiers<I, S>(mut self, classifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classifiers = classifiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_storage(mut self, storage: StorageMode) -> Self {
        self.storage = Some(storage);
        self
    }
}

/// A token issued for a stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub alias: String,
    pub format: AliasFormat,
}

/// A stored value together with the aliases that reference it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasRecord {
    pub value: String,
    #[serde(default)]
    pub classifiers: Vec<String>,
    pub aliases: Vec<Alias>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub storage: StorageMode,
}

impl AliasRecord {
    pub fn first_alias(&self) -> Option<&str> {
        self.aliases.first().map(|a| a.alias.as_str())
    }
}

/// Partial update applied to an existing alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasUpdate {
    pub classifiers: Vec<String>,
}

impl AliasUpdate {
    pub fn classifiers<I, S>(classifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classifiers: classifiers.into_iter().map(Into::into).collect(),
        }
    }
}

/// `{"data": ...}` wrapper used by every aliases request and response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Error body returned by the vault.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl ErrorEnvelope {
    pub fn single(status: u16, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            errors: vec![ApiErrorDetail {
                status: Some(status),
                title: Some(title.into()),
                detail: Some(detail.into()),
                href: None,
            }],
        }
    }

    /// Human-readable summary of all reported errors.
    pub fn message(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .errors
            .iter()
            .filter_map(|e| e.detail.as_deref().or(e.title.as_deref()))
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}

/// Reject batches the vault would refuse before sending them.
pub fn validate_batch(items: &[AliasRequest]) -> Result<(), VaultError> {
    if items.is_empty() {
        return Err(VaultError::InvalidRequest(
            "at least one item is required to redact".to_string(),
        ));
    }
    for item in items {
        item.validate()?;
    }
    Ok(())
}
