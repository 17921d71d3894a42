use vault_core::observability::{init_tracing, LogFormat};
use vault_sandbox::{config::SandboxConfig, Application};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info,vault_sandbox=debug", LogFormat::from_env());

    let config = SandboxConfig::load()?;
    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
