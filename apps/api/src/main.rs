use std::sync::Arc;

use agent_status_api::api::{self, AppState};
use agent_status_api::config::{AppConfig, DEFAULT_LOG_FILTER};
use agent_status_api::infrastructure::repositories::InMemoryAgentRepository;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!("{}, using defaults", e);
        AppConfig::default()
    });

    // The repository lives as long as the process
    let state = AppState::new(Arc::new(InMemoryAgentRepository::new()));
    let app = api::router(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
