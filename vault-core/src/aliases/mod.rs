//! Vault aliases API: store, update, reveal and delete tokens.
//!
//! [`AliasesApi`] is the contract shared by the HTTP client talking to a
//! real vault ([`HttpAliasesClient`]) and the in-memory substitute used by
//! tests and the sandbox server ([`MemoryVault`]).

pub mod client;
pub mod memory;
pub mod models;

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::VaultError;

pub use client::HttpAliasesClient;
pub use memory::MemoryVault;
pub use models::{
    Alias, AliasFormat, AliasRecord, AliasRequest, AliasUpdate, ApiErrorDetail, DataEnvelope,
    ErrorEnvelope, StorageMode, validate_batch,
};

/// Operations exposed by the vault aliases namespace.
#[async_trait]
pub trait AliasesApi: Send + Sync {
    /// Store a batch of values in a single request.
    ///
    /// Returns one record per item, in input order.
    async fn redact(&self, items: &[AliasRequest]) -> Result<Vec<AliasRecord>, VaultError>;

    /// Replace the classifiers of an existing alias. The stored value and the
    /// alias identifier are unchanged.
    async fn update(&self, alias: &str, update: &AliasUpdate) -> Result<(), VaultError>;

    /// Retrieve the value stored behind an alias.
    async fn reveal(&self, alias: &str) -> Result<AliasRecord, VaultError>;

    /// Retrieve several aliases at once, keyed by alias.
    async fn reveal_many(
        &self,
        aliases: &[String],
    ) -> Result<HashMap<String, AliasRecord>, VaultError>;

    /// Permanently invalidate an alias.
    async fn delete(&self, alias: &str) -> Result<(), VaultError>;
}
