//! HTTP server implementation

use anyhow::Context;
use axum::Router;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use yoda_mqa::MqaEngine;

use crate::{handlers::AppState, routes::create_router};

/// Largest accepted metadata document
pub const DEFAULT_MAX_BODY_BYTES: usize = 3 * 1024 * 1024;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn address(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid server address {}:{}", self.host, self.port))
    }
}

/// MQA API server
pub struct MqaServer {
    config: ServerConfig,
    app_state: AppState,
}

impl MqaServer {
    pub fn new(engine: MqaEngine) -> Self {
        Self::with_config(ServerConfig::default(), engine)
    }

    pub fn with_config(config: ServerConfig, engine: MqaEngine) -> Self {
        Self {
            config,
            app_state: AppState::new(Arc::new(engine)),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn create_app(&self) -> Router {
        create_router(Arc::new(self.app_state.clone()), self.config.max_body_bytes)
    }

    /// Start the server
    pub async fn serve(self) -> anyhow::Result<()> {
        self.run_with_shutdown(std::future::pending()).await
    }

    /// Run the server until `shutdown_signal` resolves
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let addr = self.config.address()?;
        let app = self.create_app();

        let listener = TcpListener::bind(addr).await?;
        info!("MQA API listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| {
                error!("Server error: {}", e);
                e.into()
            })
    }
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.max_body_bytes, 3 * 1024 * 1024);
        assert_eq!(config.address().unwrap(), "0.0.0.0:5000".parse().unwrap());
    }

    #[test]
    fn test_invalid_address() {
        let config = ServerConfig::default().with_host("not a host");
        assert!(config.address().is_err());
    }
}
