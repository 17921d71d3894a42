//! Common test utilities for workflow integration tests.

use vault_core::{HttpAliasesClient, MemoryVault, VaultConfig};
use vault_sandbox::config::SandboxConfig;
use vault_sandbox::startup::Application;

pub const SANDBOX_USERNAME: &str = "workflow-user";
pub const SANDBOX_PASSWORD: &str = "workflow-password";

/// A running sandbox vault and a client bound to it.
pub struct TestContext {
    pub base_url: String,
    pub vault: MemoryVault,
    pub client: HttpAliasesClient,
}

/// Spawn a sandbox on a random port and connect a client with valid credentials.
///
/// This is the main entry point for workflow tests.
pub async fn setup() -> TestContext {
    vault_core::observability::init_test_tracing();

    let app = Application::build(SandboxConfig::new(SANDBOX_USERNAME, SANDBOX_PASSWORD))
        .await
        .expect("Failed to build sandbox");
    let base_url = format!("http://127.0.0.1:{}", app.port());
    let vault = app.vault().clone();

    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    let client = client_for(&base_url, SANDBOX_USERNAME, SANDBOX_PASSWORD);

    assert!(
        wait_until_listening(&base_url).await,
        "Sandbox did not become ready"
    );

    TestContext {
        base_url,
        vault,
        client,
    }
}

pub fn client_for(base_url: &str, username: &str, password: &str) -> HttpAliasesClient {
    HttpAliasesClient::new(VaultConfig::new(username, password).with_base_url(base_url))
        .expect("Failed to create aliases client")
}

/// Poll the sandbox port until it accepts TCP connections.
async fn wait_until_listening(base_url: &str) -> bool {
    let addr = base_url.trim_start_matches("http://").to_string();
    for _ in 0..50 {
        if tokio::net::TcpStream::connect(&addr).await.is_ok() {
            return true;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }
    false
}
