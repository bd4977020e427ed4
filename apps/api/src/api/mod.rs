// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;

use axum::{
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

use crate::domain::repositories::AgentRepository;
use handlers::{agents, system};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub agents: Arc<dyn AgentRepository>,
}

impl AppState {
    pub fn new(agents: Arc<dyn AgentRepository>) -> Self {
        Self { agents }
    }
}

/// Builds the full application router
pub fn router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    Router::new()
        // Health check
        .route("/health", get(system::health_check))
        // Agent routes
        .route(
            "/api/agents",
            get(agents::list_agents).post(agents::create_agent),
        )
        .route("/api/agents/status/summary", get(agents::get_status_summary))
        .route(
            "/api/agents/:id",
            get(agents::get_agent)
                .put(agents::update_agent)
                .delete(agents::delete_agent),
        )
        .route("/api/agents/:id/status", patch(agents::update_agent_status))
        .fallback(system::route_not_found)
        .method_not_allowed_fallback(system::route_not_found)
        // Middleware
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(trace)
        .layer(cors)
        // Shared state
        .with_state(state)
}
