//! Health check handlers.

use axum::{Json, extract::State};

use crate::api::state::AppState;
use crate::domain::HealthResponse;

/// Liveness probe - always returns 200 if the service is running.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::now())
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<AppState>) -> String {
    let mut output = String::new();

    output.push_str("# HELP polydivisible_up Whether the service is up\n");
    output.push_str("# TYPE polydivisible_up gauge\n");
    output.push_str("polydivisible_up 1\n");

    if let Some(handle) = &state.metrics {
        output.push_str(&handle.render());
    }

    output
}
