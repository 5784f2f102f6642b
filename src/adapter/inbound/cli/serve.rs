//! Handler for the `serve` command.

use std::path::Path;

use tokio::net::TcpListener;
use tracing::info;

use crate::adapter::inbound::http;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_services;

/// Execute the serve command.
pub async fn execute(config_path: &Path) -> Result<()> {
    let config = super::load_config(config_path)?;
    info!(config = %config_path.display(), "spycats starting");

    let services = build_services(&config)?;
    let listener = TcpListener::bind(config.server.address()).await?;
    http::serve(listener, http::router(services), shutdown_signal()).await?;

    info!("spycats stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
