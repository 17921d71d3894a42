use vault_core::observability::{init_tracing, LogFormat};
use vault_core::{HttpAliasesClient, VaultConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(
        "info,tokenization_workflow=debug,vault_core=info",
        LogFormat::from_env(),
    );

    let config = VaultConfig::load()?;
    tracing::info!(
        username = %config.username,
        base_url = %config.base_url(),
        "Loaded vault configuration"
    );

    let client = HttpAliasesClient::new(config)?;
    let report = tokenization_workflow::run_demo(&client).await?;

    tracing::info!(
        alias = %report.first_alias,
        tokens = report.records.len(),
        "Workflow complete"
    );
    Ok(())
}
