use crate::error::VaultError;
use config::{Config as Cfg, Environment, File};
use reqwest::Url;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

pub const SANDBOX_BASE_URL: &str = "https://api.sandbox.verygoodvault.com";
pub const LIVE_BASE_URL: &str = "https://api.live.verygoodvault.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Vault environment used when no explicit base URL is configured.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VaultEnvironment {
    #[default]
    Sandbox,
    Live,
}

impl VaultEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            VaultEnvironment::Sandbox => SANDBOX_BASE_URL,
            VaultEnvironment::Live => LIVE_BASE_URL,
        }
    }
}

/// Credentials and endpoint for the vault aliases API.
///
/// Loaded from `VAULT_API_*` environment variables (and an optional
/// `configuration` file). The password never appears in `Debug` output.
#[derive(Debug, Deserialize, Clone)]
pub struct VaultConfig {
    #[serde(default)]
    pub username: String,
    #[serde(default = "empty_secret")]
    pub password: Secret<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub environment: VaultEnvironment,
    /// Read from `timeout_secs` in files and `VAULT_API_TIMEOUT_SECS`.
    #[serde(
        rename = "timeout_secs",
        default = "default_timeout",
        deserialize_with = "duration_from_secs"
    )]
    pub timeout: Duration,
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

fn duration_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}

impl VaultConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Secret::new(password.into()),
            base_url: None,
            environment: VaultEnvironment::default(),
            timeout: default_timeout(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_environment(mut self, environment: VaultEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from `.env`, the optional `configuration` file and
    /// `VAULT_API_*` environment variables, in increasing precedence.
    pub fn load() -> Result<Self, VaultError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(Environment::with_prefix("VAULT_API"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Resolved base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Reject configurations that cannot possibly authenticate.
    ///
    /// Credentials must be present and the base URL must be an absolute
    /// http(s) URL with a host.
    pub fn validate(&self) -> Result<(), VaultError> {
        if self.username.trim().is_empty() {
            return Err(VaultError::Config("VAULT_API_USERNAME is not set".to_string()));
        }
        if self.password.expose_secret().is_empty() {
            return Err(VaultError::Config("VAULT_API_PASSWORD is not set".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(VaultError::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        let base = self.base_url();
        let parsed = Url::parse(base)
            .map_err(|e| VaultError::Config(format!("Invalid vault base URL '{}': {}", base, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(VaultError::Config(format!(
                "Vault base URL must use http or https; got '{}://'",
                parsed.scheme()
            )));
        }
        if parsed.host_str().is_none() {
            return Err(VaultError::Config(
                "Vault base URL must include a host".to_string(),
            ));
        }

        Ok(())
    }
}
