//! vault-core: shared infrastructure and the aliases client for the tokenization vault.
pub mod aliases;
pub mod config;
pub mod error;
pub mod observability;

pub use aliases::{
    Alias, AliasFormat, AliasRecord, AliasRequest, AliasUpdate, AliasesApi, HttpAliasesClient,
    MemoryVault, StorageMode,
};
pub use crate::config::{VaultConfig, VaultEnvironment};
pub use error::VaultError;

pub use async_trait;
