use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bookstore_server::{ServerConfig, router, seed};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::parse();

    let store = config
        .build_store()
        .await
        .context("Could not initialise the book store")?;

    if config.seed {
        seed::seed(&store)
            .await
            .context("Could not seed sample books")?;
    }

    let store = Arc::new(store);
    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Could not bind {}", config.bind_address()))?;

    tracing::info!(
        address = %listener.local_addr()?,
        backend = ?config.backend_kind(),
        "bookstore server listening"
    );

    axum::serve(listener, router(Arc::clone(&store)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    match Arc::try_unwrap(store) {
        Ok(store) => store.shutdown().await?,
        Err(_) => tracing::warn!("store still in use at shutdown, skipping backend shutdown"),
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }

    tracing::info!("shutting down");
}
