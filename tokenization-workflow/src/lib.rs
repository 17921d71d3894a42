//! Tokenization workflow against the vault aliases API.
//!
//! Stores a batch of sensitive values, reclassifies the first alias, reveals
//! it, deletes it and finally confirms the deleted alias no longer resolves.
//! Every call is awaited before the next one starts.
//!
//! ## Usage
//!
//! ```bash
//! export VAULT_API_USERNAME=...
//! export VAULT_API_PASSWORD=...
//! # optional: VAULT_API_BASE_URL, VAULT_API_ENVIRONMENT=live
//! cargo run -p tokenization-workflow
//! ```

pub mod demo;

use thiserror::Error;
use vault_core::{AliasRecord, AliasRequest, AliasUpdate, AliasesApi, VaultError};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error("Failed to render vault response: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Vault issued no alias for the first item")]
    NoAliasIssued,

    #[error("Alias {0} still resolves after deletion")]
    DeletedAliasStillResolvable(String),
}

/// What a completed workflow observed.
#[derive(Debug)]
pub struct WorkflowReport {
    /// Records created by the batch redact, in submission order.
    pub records: Vec<AliasRecord>,
    /// Alias that was updated, revealed and deleted.
    pub first_alias: String,
    /// Record revealed after the update.
    pub revealed: AliasRecord,
    /// Error returned when revealing the deleted alias.
    pub deleted_reveal_error: VaultError,
}

/// Run the workflow with the sample payload.
pub async fn run_demo<A>(api: &A) -> Result<WorkflowReport, WorkflowError>
where
    A: AliasesApi + ?Sized,
{
    run(api, &demo::batch(), &demo::reclassification()).await
}

/// Redact `items`, then update, reveal and delete the first alias.
///
/// The final reveal of the deleted alias is expected to fail; its error is
/// logged and returned in the report. Any other failure aborts the workflow.
pub async fn run<A>(
    api: &A,
    items: &[AliasRequest],
    reclassification: &AliasUpdate,
) -> Result<WorkflowReport, WorkflowError>
where
    A: AliasesApi + ?Sized,
{
    tracing::info!("Tokenizing multiple values...");
    let records = api.redact(items).await?;

    tracing::info!(
        "Tokens created\n{}",
        serde_json::to_string_pretty(&records)?
    );
    for record in &records {
        if let Some(alias) = record.first_alias() {
            tracing::info!("{}", alias);
        }
    }

    let first_alias = records
        .first()
        .and_then(AliasRecord::first_alias)
        .ok_or(WorkflowError::NoAliasIssued)?
        .to_string();

    api.update(&first_alias, reclassification).await?;
    tracing::info!("Token {} updated", first_alias);

    let revealed = api.reveal(&first_alias).await?;
    tracing::info!(
        "Token {} retrieved\n{}",
        first_alias,
        serde_json::to_string_pretty(&revealed)?
    );

    api.delete(&first_alias).await?;
    tracing::info!("Token {} deleted", first_alias);

    tracing::info!("Trying to retrieve deleted token {}...", first_alias);
    let deleted_reveal_error = match api.reveal(&first_alias).await {
        Ok(_) => {
            tracing::error!(alias = %first_alias, "Deleted token is still retrievable");
            return Err(WorkflowError::DeletedAliasStillResolvable(first_alias));
        }
        Err(error) => {
            tracing::info!(
                "We can no longer fetch the token, it has been deleted: {}",
                error
            );
            error
        }
    };

    Ok(WorkflowReport {
        records,
        first_alias,
        revealed,
        deleted_reveal_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use vault_core::async_trait::async_trait;
    use vault_core::MemoryVault;

    /// Vault whose deletes silently do nothing.
    struct StaleVault(MemoryVault);

    #[async_trait]
    impl AliasesApi for StaleVault {
        async fn redact(&self, items: &[AliasRequest]) -> Result<Vec<AliasRecord>, VaultError> {
            self.0.redact(items).await
        }

        async fn update(&self, alias: &str, update: &AliasUpdate) -> Result<(), VaultError> {
            self.0.update(alias, update).await
        }

        async fn reveal(&self, alias: &str) -> Result<AliasRecord, VaultError> {
            self.0.reveal(alias).await
        }

        async fn reveal_many(
            &self,
            aliases: &[String],
        ) -> Result<HashMap<String, AliasRecord>, VaultError> {
            self.0.reveal_many(aliases).await
        }

        async fn delete(&self, _alias: &str) -> Result<(), VaultError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn demo_runs_end_to_end_against_memory_vault() {
        let vault = MemoryVault::new();

        let report = run_demo(&vault).await.expect("workflow should succeed");

        assert_eq!(report.records.len(), 3);
        assert_eq!(report.records[0].value, demo::CARD_NUMBER);
        assert_eq!(report.records[1].value, demo::CARD_SECURITY_CODE);
        assert_eq!(report.records[2].value, demo::SOCIAL_SECURITY_NUMBER);
        assert_eq!(report.first_alias, report.records[0].first_alias().unwrap());

        assert_eq!(report.revealed.value, demo::CARD_NUMBER);
        assert_eq!(report.revealed.classifiers, vec!["bank-account", "test-tag"]);

        assert!(report.deleted_reveal_error.is_not_found());
        assert!(!vault.contains(&report.first_alias));
        assert_eq!(vault.len(), 2);
    }

    #[tokio::test]
    async fn stale_reveal_after_delete_fails_the_workflow() {
        let vault = StaleVault(MemoryVault::new());

        let err = run_demo(&vault).await.unwrap_err();

        assert!(matches!(err, WorkflowError::DeletedAliasStillResolvable(_)));
    }

    #[tokio::test]
    async fn redact_errors_propagate() {
        let vault = MemoryVault::new();

        let err = run(&vault, &[], &demo::reclassification()).await.unwrap_err();

        assert!(matches!(err, WorkflowError::Vault(VaultError::InvalidRequest(_))));
        assert!(vault.is_empty());
    }

    #[tokio::test]
    async fn works_through_trait_objects() {
        let vault: Box<dyn AliasesApi> = Box::new(MemoryVault::new());

        let report = run_demo(vault.as_ref()).await.unwrap();

        assert_eq!(report.records.len(), 3);
    }
}
