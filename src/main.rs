mod app_system;
mod clients;
mod domain;
mod error;
mod handler;
mod messages;
mod product;
mod product_actor;
mod store;

#[cfg(test)]
mod mock_framework;

use anyhow::Context;
use tracing::info;

use crate::app_system::{open_store, setup_tracing, AppConfig, CatalogSystem};
use crate::handler::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = AppConfig::from_env().context("loading configuration")?;
    info!(store = ?config.store, addr = %config.bind_addr, "Starting catalog API");

    let store = open_store(&config).await.context("opening product store")?;
    let system = CatalogSystem::new(store);

    let app = router(AppState::new(system.product_client.clone(), config.token.as_str()));
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .context("serving HTTP")?;

    system.shutdown().await.map_err(anyhow::Error::msg)?;

    info!("Application completed successfully");
    Ok(())
}
