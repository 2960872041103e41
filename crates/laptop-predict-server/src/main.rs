use std::sync::Arc;

use anyhow::{Context, Result};
use laptop_predict_config::ServerConfig;
use laptop_predict_core::ModelStore;
use laptop_predict_server::{app, cors_layer, serve, ServerState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;

    // Both models must be in memory before the listener is bound.
    let models = ModelStore::load(&config.spec_model_path, &config.price_model_path)
        .context("failed to load models")?;
    let state = Arc::new(ServerState::new(models));

    let cors = cors_layer(&config.allowed_origin)
        .with_context(|| format!("invalid allowed origin {}", config.allowed_origin))?;
    let router = app(state, cors);

    info!("Starting server on {}", config.bind_addr);
    info!("Allowing cross-origin requests from {}", config.allowed_origin);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    serve(listener, router, shutdown_signal()).await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
