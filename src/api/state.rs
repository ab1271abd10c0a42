//! Application state for Axum handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;

/// Shared application state.
///
/// The polydivisibility logic itself is stateless; handlers only need the
/// configured limits and, when installed, the metrics recorder handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Prometheus recorder handle, if metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state without a metrics recorder.
    #[must_use]
    pub const fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            metrics: None,
        }
    }

    /// Attach a Prometheus recorder handle.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
