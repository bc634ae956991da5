// src/api/mod.rs — HTTP API for the lesson editor

pub mod auth;
pub mod handlers;
pub mod types;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::learning::server::EngineHandle;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub engine: EngineHandle,
    pub token: Option<String>,
}

/// Build the axum router with all API routes.
///
/// Every route except the health check sits behind the token guard.
pub fn build_router(state: ApiState) -> Router {
    let guarded = Router::new()
        .route("/api/v1/lessons", post(handlers::create_lesson))
        .route(
            "/api/v1/lessons/{id}",
            get(handlers::get_lesson).put(handlers::update_lesson),
        )
        .route("/api/v1/lessons/{id}/analyze", post(handlers::analyze_lesson))
        .route("/api/v1/suggestions", post(handlers::get_suggestions))
        .route("/api/v1/feedback", post(handlers::submit_feedback))
        .route("/api/v1/patterns", get(handlers::list_patterns))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ));

    Router::new()
        .merge(guarded)
        .route("/api/v1/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the API server on the given port (blocking).
pub async fn start_server(port: u16, state: ApiState) -> anyhow::Result<()> {
    let addr = format!("127.0.0.1:{port}");
    let router = build_router(state);

    tracing::info!("API server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
