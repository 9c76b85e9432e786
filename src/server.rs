use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::medicine_router;
use crate::config::Config;
use crate::store::{JsonFileBackend, Store};

/// HTTP server over the JSON-backed medicine store
pub struct Server {
  listener: TcpListener,
  local_addr: SocketAddr,
  store: Arc<Store>,
}

impl Server {
  /// Prepare the document and bind the listener
  pub async fn start(config: &Config) -> anyhow::Result<Self> {
    let backend = JsonFileBackend::new(&config.data_path);
    if config.create_if_missing {
      backend
        .create_if_missing()
        .await
        .context("failed to create medicine document")?;
    } else if !backend.path().exists() {
      warn!(
        "Medicine document {} does not exist, requests will fail until it is created",
        backend.path().display()
      );
    }
    info!("Using medicine document {}", backend.path().display());

    let listener = TcpListener::bind(&config.server_addr)
      .await
      .with_context(|| format!("failed to bind {}", config.server_addr))?;
    let local_addr = listener.local_addr()?;
    info!("HTTP server bound to {}", local_addr);

    Ok(Self {
      listener,
      local_addr,
      store: Arc::new(Store::new(Arc::new(backend))),
    })
  }

  /// Get local listening address
  pub fn local_addr(&self) -> SocketAddr {
    self.local_addr
  }

  /// Serve requests until Ctrl-C
  pub async fn run(self) -> anyhow::Result<()> {
    info!("Server started, listening on {}", self.local_addr);

    let app = medicine_router(self.store);
    axum::serve(self.listener, app)
      .with_graceful_shutdown(shutdown_signal())
      .await?;

    info!("Server stopped");
    Ok(())
  }
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!("Failed to listen for shutdown signal: {}", e);
    std::future::pending::<()>().await;
  }
  info!("Shutdown signal received");
}
