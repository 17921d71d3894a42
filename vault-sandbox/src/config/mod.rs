use config::{Config as Cfg, Environment, File};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use vault_core::VaultError;

#[derive(Deserialize, Clone, Debug)]
pub struct SandboxConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Basic-auth username clients must present. Required.
    pub username: String,
    pub password: Secret<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl SandboxConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            username: username.into(),
            password: Secret::new(password.into()),
        }
    }

    /// Load from `.env`, an optional `sandbox` file and `SANDBOX_VAULT_*` variables.
    pub fn load() -> Result<Self, VaultError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("sandbox").required(false))
            .add_source(Environment::with_prefix("SANDBOX_VAULT"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), VaultError> {
        if self.username.trim().is_empty() || self.password.expose_secret().is_empty() {
            return Err(VaultError::Config(
                "SANDBOX_VAULT_USERNAME and SANDBOX_VAULT_PASSWORD must be set".to_string(),
            ));
        }
        Ok(())
    }
}
