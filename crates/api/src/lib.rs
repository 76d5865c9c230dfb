//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes
//! - Request/response types
//! - Input validation against configured limits

pub mod routes;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use liftgauge_shared::AppConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded application configuration.
    pub config: Arc<AppConfig>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
