mod api;
mod average;
mod config;
mod model;
mod server;
mod store;
mod validate;

use std::path::PathBuf;

use clap::Parser;
use config::Config;
use server::Server;
use tracing::info;

/// JSON-backed medicine store over HTTP
#[derive(Debug, Parser)]
#[command(name = "medstore", version)]
struct Args {
  /// Path to a TOML config file
  #[arg(short, long)]
  config: Option<String>,

  /// Listening address, overrides the config file
  #[arg(long)]
  addr: Option<String>,

  /// Path of the medicine document, overrides the config file
  #[arg(long)]
  data: Option<PathBuf>,

  /// Create an empty medicine document if it does not exist
  #[arg(long)]
  create_if_missing: bool,
}

impl Args {
  fn into_config(self) -> anyhow::Result<Config> {
    let mut config = match &self.config {
      Some(path) => Config::from_file(path)?,
      None => Config::default(),
    };
    if let Some(addr) = self.addr {
      config.server_addr = addr;
    }
    if let Some(data) = self.data {
      config.data_path = data;
    }
    config.create_if_missing |= self.create_if_missing;
    Ok(config)
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let config = Args::parse().into_config()?;

  // Initialize logging
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log.level)),
    )
    .with_target(true)
    .with_thread_ids(true)
    .init();

  info!("Starting medstore");
  info!("Version: {}", env!("CARGO_PKG_VERSION"));

  let server = Server::start(&config).await?;
  info!("Server listening on: {}", server.local_addr());

  server.run().await
}
