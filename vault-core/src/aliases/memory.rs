//! In-memory [`AliasesApi`] backend.
//!
//! Suitable for tests and the local sandbox. Values live in process memory
//! with no persistence and aliases are opaque random identifiers.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::AliasesApi;
use super::models::{Alias, AliasRecord, AliasRequest, AliasUpdate, validate_batch};
use crate::error::VaultError;

const ALIAS_PREFIX: &str = "tok_sandbox_";

/// Thread-safe in-memory alias store.
///
/// Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct MemoryVault {
    records: Arc<DashMap<String, AliasRecord>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.records.contains_key(alias)
    }

    fn issue_alias() -> String {
        format!("{}{}", ALIAS_PREFIX, Uuid::new_v4().simple())
    }

    fn not_found(alias: &str) -> VaultError {
        VaultError::NotFound(format!("Alias {} not found", alias))
    }
}

/// Drop repeated classifiers, keeping first occurrences in order.
fn dedup_classifiers(classifiers: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(classifiers.len());
    for classifier in classifiers {
        if !unique.contains(classifier) {
            unique.push(classifier.clone());
        }
    }
    unique
}

#[async_trait]
impl AliasesApi for MemoryVault {
    async fn redact(&self, items: &[AliasRequest]) -> Result<Vec<AliasRecord>, VaultError> {
        validate_batch(items)?;

        let created_at = Utc::now();
        let records: Vec<AliasRecord> = items
            .iter()
            .map(|item| AliasRecord {
                value: item.value.clone(),
                classifiers: dedup_classifiers(&item.classifiers),
                aliases: vec![Alias {
                    alias: Self::issue_alias(),
                    format: item.format,
                }],
                created_at,
                storage: item.storage.unwrap_or_default(),
            })
            .collect();

        for record in &records {
            for alias in &record.aliases {
                self.records.insert(alias.alias.clone(), record.clone());
            }
        }

        tracing::debug!(count = records.len(), "Stored values in memory vault");
        Ok(records)
    }

    async fn update(&self, alias: &str, update: &AliasUpdate) -> Result<(), VaultError> {
        let mut record = self
            .records
            .get_mut(alias)
            .ok_or_else(|| Self::not_found(alias))?;
        record.classifiers = dedup_classifiers(&update.classifiers);
        Ok(())
    }

    async fn reveal(&self, alias: &str) -> Result<AliasRecord, VaultError> {
        self.records
            .get(alias)
            .map(|record| record.value().clone())
            .ok_or_else(|| Self::not_found(alias))
    }

    async fn reveal_many(
        &self,
        aliases: &[String],
    ) -> Result<HashMap<String, AliasRecord>, VaultError> {
        let mut revealed = HashMap::with_capacity(aliases.len());
        for alias in aliases {
            let record = self.reveal(alias).await?;
            revealed.insert(alias.clone(), record);
        }
        Ok(revealed)
    }

    async fn delete(&self, alias: &str) -> Result<(), VaultError> {
        self.records
            .remove(alias)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(alias))
    }
}
