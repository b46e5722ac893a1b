//! # Routes
//!
//! Axum router configuration for the donation API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - POST /api/creer-don - Create a donation checkout
/// - POST /webhook/helloasso - Provider notifications
/// - GET  /health - Liveness probe
/// - anything else - Static files from the public directory
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Donation form, thank-you and error pages
    let static_files = ServeDir::new(&state.config.public_dir);

    let api_routes = Router::new().route("/creer-don", post(handlers::create_donation));

    let webhook_path = state.gateway.webhook_path();

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .route(&webhook_path, post(handlers::helloasso_webhook))
        .fallback_service(static_files)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
