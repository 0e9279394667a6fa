//! Flip-Ceremony client entry point.

use anyhow::{Context, Result};
use client_runtime::config::ClientConfig;
use client_runtime::ClientRuntime;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("installing tracing subscriber")?;

    let mut config = ClientConfig::default();
    if let Ok(data_dir) = std::env::var("FC_DATA_DIR") {
        config.storage.data_dir = data_dir.into();
    }

    let runtime = ClientRuntime::new(config).context("assembling client runtime")?;
    runtime.run().await
}
