//! Router setup and configuration.

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{health, polydivisible};
use crate::api::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let cors_permissive = state.config.server.cors_permissive;

    // Probes (root-level and under /api)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/metrics", get(health::metrics));

    let polydivisible_routes = Router::new()
        .route("/check", get(polydivisible::check))
        .route("/generate", get(polydivisible::generate));

    let api_routes = Router::new()
        .route("/health", get(health::health))
        .nest("/polydivisible", polydivisible_routes);

    let router = Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http());

    let router = if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}
