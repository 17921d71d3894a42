use vault_core::MemoryVault;
use vault_sandbox::config::SandboxConfig;
use vault_sandbox::startup::Application;

pub const TEST_USERNAME: &str = "test-user";
pub const TEST_PASSWORD: &str = "test-password";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub vault: MemoryVault,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        vault_core::observability::init_test_tracing();

        let config = SandboxConfig::new(TEST_USERNAME, TEST_PASSWORD);
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);
        let vault = app.vault().clone();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            vault,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Request builder carrying the sandbox credentials.
    pub fn authed(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .basic_auth(TEST_USERNAME, Some(TEST_PASSWORD))
    }
}
