//! Application startup and lifecycle management.
//!
//! Serves the aliases REST surface over a [`MemoryVault`] so the client and
//! the workflow can run without a hosted vault.

use axum::{
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use vault_core::MemoryVault;

use crate::config::SandboxConfig;
use crate::handlers;
use crate::middleware::require_basic_auth;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: SandboxConfig,
    pub vault: MemoryVault,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application and bind its listener (port 0 = random port for testing).
    pub async fn build(config: SandboxConfig) -> anyhow::Result<Self> {
        Self::build_with_vault(config, MemoryVault::new()).await
    }

    /// Build the application around an existing vault.
    pub async fn build_with_vault(config: SandboxConfig, vault: MemoryVault) -> anyhow::Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            e
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Vault sandbox: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState { config, vault },
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn vault(&self) -> &MemoryVault {
        &self.state.vault
    }

    pub fn router(state: AppState) -> Router {
        let aliases = Router::new()
            .route(
                "/aliases",
                get(handlers::aliases::reveal_many).post(handlers::aliases::redact),
            )
            .route(
                "/aliases/:alias",
                get(handlers::aliases::reveal)
                    .put(handlers::aliases::update)
                    .delete(handlers::aliases::delete),
            )
            .route_layer(from_fn_with_state(state.clone(), require_basic_auth));

        Router::new()
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .merge(aliases)
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                }),
            )
            .with_state(state)
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = Self::router(self.state);
        tracing::info!("Listening on {}", self.listener.local_addr()?);
        axum::serve(self.listener, router).await
    }
}
