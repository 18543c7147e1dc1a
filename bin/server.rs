// Receipt Points - Web Server
// Loads config, wires the processor into the router, serves until Ctrl-C

use anyhow::{Context, Result};
use receipt_points::config::CONFIG_PATH_ENV;
use receipt_points::{build_router, AppState, ReceiptProcessor, ServerConfig};
use std::env;
use std::path::PathBuf;
use tracing::info;

/// `--config <path>` wins over RECEIPT_POINTS_CONFIG
fn config_path() -> Option<PathBuf> {
    let args: Vec<String> = env::args().collect();

    args.iter()
        .position(|arg| arg == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
        .or_else(|| env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    let path = config_path();
    let config = ServerConfig::resolve(path.as_deref()).context("Failed to load configuration")?;
    config.logging.init();

    if let Some(path) = &path {
        info!(path = %path.display(), "loaded configuration");
    }

    let state = AppState::new(ReceiptProcessor::in_memory(), config.unknown_id_as_zero);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!(
        addr = %config.bind_addr,
        unknown_id_as_zero = config.unknown_id_as_zero,
        "receipt server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
