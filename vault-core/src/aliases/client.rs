//! HTTP client for the vault aliases API.
//!
//! Every request authenticates with HTTP basic auth using the configured
//! credentials and is bounded by the configured request timeout.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url, header};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use super::AliasesApi;
use super::models::{
    AliasRecord, AliasRequest, AliasUpdate, DataEnvelope, ErrorEnvelope, validate_batch,
};
use crate::config::VaultConfig;
use crate::error::VaultError;

/// Aliases API client bound to one set of credentials and one endpoint.
#[derive(Clone)]
pub struct HttpAliasesClient {
    http: Client,
    base_url: Url,
    username: String,
    password: Secret<String>,
}

impl HttpAliasesClient {
    /// Create a client from a validated configuration.
    pub fn new(config: VaultConfig) -> Result<Self, VaultError> {
        config.validate()?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(config.timeout())
            .user_agent(concat!("vault-core/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = Url::parse(config.base_url())
            .map_err(|e| VaultError::Config(format!("Invalid vault base URL: {}", e)))?;

        tracing::debug!(base_url = %base_url, username = %config.username, "Aliases client initialized");

        Ok(Self {
            http,
            base_url,
            username: config.username,
            password: config.password,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/aliases[/{alias}]`, percent-encoding the alias segment.
    fn aliases_url(&self, alias: Option<&str>) -> Result<Url, VaultError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| VaultError::Config("Vault base URL cannot carry a path".to_string()))?;
            segments.pop_if_empty().push("aliases");
            if let Some(alias) = alias {
                segments.push(alias);
            }
        }
        Ok(url)
    }

    /// Authenticate and send a request, turning non-success statuses into errors.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, VaultError> {
        let response = request
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(status = %status, error = %e, "Failed to read vault error body");
                String::new()
            }
        };
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|envelope| envelope.message())
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                } else {
                    body
                }
            });

        tracing::warn!(status = %status, message = %message, "Vault request failed");
        Err(VaultError::from_status(status, message))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, VaultError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl AliasesApi for HttpAliasesClient {
    async fn redact(&self, items: &[AliasRequest]) -> Result<Vec<AliasRecord>, VaultError> {
        validate_batch(items)?;

        let url = self.aliases_url(None)?;
        let response = self
            .execute(self.http.post(url).json(&DataEnvelope::new(items)))
            .await?;
        let envelope: DataEnvelope<Vec<AliasRecord>> = Self::decode(response).await?;

        if envelope.data.len() != items.len() {
            return Err(VaultError::UnexpectedResponse(format!(
                "submitted {} items but vault returned {} records",
                items.len(),
                envelope.data.len()
            )));
        }

        tracing::info!(count = envelope.data.len(), "Values redacted");
        Ok(envelope.data)
    }

    async fn update(&self, alias: &str, update: &AliasUpdate) -> Result<(), VaultError> {
        let url = self.aliases_url(Some(alias))?;
        self.execute(self.http.put(url).json(&DataEnvelope::new(update)))
            .await?;

        tracing::info!(alias = %alias, classifiers = ?update.classifiers, "Alias updated");
        Ok(())
    }

    async fn reveal(&self, alias: &str) -> Result<AliasRecord, VaultError> {
        let url = self.aliases_url(Some(alias))?;
        let response = self.execute(self.http.get(url)).await?;
        let envelope: DataEnvelope<Vec<AliasRecord>> = Self::decode(response).await?;

        tracing::debug!(alias = %alias, "Alias revealed");
        envelope
            .data
            .into_iter()
            .next()
            .ok_or_else(|| VaultError::NotFound(format!("Alias {} not found", alias)))
    }

    async fn reveal_many(
        &self,
        aliases: &[String],
    ) -> Result<HashMap<String, AliasRecord>, VaultError> {
        if aliases.is_empty() {
            return Ok(HashMap::new());
        }

        let url = self.aliases_url(None)?;
        let response = self
            .execute(self.http.get(url).query(&[("q", aliases.join(","))]))
            .await?;
        let envelope: DataEnvelope<HashMap<String, AliasRecord>> = Self::decode(response).await?;

        let missing: Vec<&str> = aliases
            .iter()
            .filter(|alias| !envelope.data.contains_key(alias.as_str()))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(VaultError::NotFound(format!(
                "Aliases not found: {}",
                missing.join(", ")
            )));
        }

        Ok(envelope.data)
    }

    async fn delete(&self, alias: &str) -> Result<(), VaultError> {
        let url = self.aliases_url(Some(alias))?;
        self.execute(self.http.delete(url)).await?;

        tracing::info!(alias = %alias, "Alias deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> HttpAliasesClient {
        HttpAliasesClient::new(VaultConfig::new("user", "pass").with_base_url(base_url)).unwrap()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let result = HttpAliasesClient::new(VaultConfig::new("", "pass"));
        assert!(matches!(result, Err(VaultError::Config(_))));
    }

    #[test]
    fn aliases_url_appends_segments() {
        let client = client("https://api.sandbox.verygoodvault.com");
        assert_eq!(
            client.aliases_url(None).unwrap().as_str(),
            "https://api.sandbox.verygoodvault.com/aliases"
        );
        assert_eq!(
            client.aliases_url(Some("tok_sandbox_abc")).unwrap().as_str(),
            "https://api.sandbox.verygoodvault.com/aliases/tok_sandbox_abc"
        );
    }

    #[test]
    fn aliases_url_keeps_base_path_and_encodes_alias() {
        let client = client("http://localhost:8080/vault/");
        assert_eq!(
            client.aliases_url(Some("tok/../x")).unwrap().as_str(),
            "http://localhost:8080/vault/aliases/tok%2F..%2Fx"
        );
    }

    #[tokio::test]
    async fn redact_validates_before_sending() {
        // Port 9 (discard) is never contacted because validation fails first.
        let client = client("http://127.0.0.1:9");
        let err = client.redact(&[]).await.unwrap_err();
        assert!(matches!(err, VaultError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn reveal_many_of_nothing_is_empty() {
        let client = client("http://127.0.0.1:9");
        assert!(client.reveal_many(&[]).await.unwrap().is_empty());
    }
}
