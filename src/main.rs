use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::{info, warn};

use marketplace_search::telemetry::init_tracing;
use marketplace_search::{AppConfig, AppState, build_router};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn run() -> Result<()> {
    let config = AppConfig::from_env().context("Invalid configuration")?;
    init_tracing(config.mode);

    info!("Environment: {}", config.mode.as_str());
    info!("Upstream endpoint: {}", config.search_endpoint());
    if !config.has_real_token() {
        warn!("No Mercado Livre access token configured, searches run unauthenticated");
    } else if !config.attach_token {
        warn!("Mercado Livre access token configured but attachment is disabled");
    }
    if config.tolerant_auth {
        info!("Tolerant auth enabled: upstream 401 responses are answered with mock data");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running on http://localhost:{}", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

// ==================== ENTRY POINT ====================
#[tokio::main]
async fn main() {
    dotenv().ok();
    if let Err(e) = run().await {
        eprintln!("\nFatal error: {:#}", e);
        std::process::exit(1);
    }
}
