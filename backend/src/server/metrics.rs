//! Optional Prometheus metrics middleware.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use tracing::warn;

/// Build the middleware exposing `/metrics`.
pub(crate) fn make_metrics() -> Result<PrometheusMetrics, Box<dyn std::error::Error + Send + Sync>> {
    PrometheusMetricsBuilder::new("library")
        .endpoint("/metrics")
        .build()
}

/// Run `build`, logging and discarding failures so the server still starts.
pub(crate) fn initialize_metrics<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    match build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "failed to initialise Prometheus metrics; continuing without them");
            None
        }
    }
}
