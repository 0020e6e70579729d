//! Prometheus metrics middleware.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

/// Request metrics exposed at `/metrics`.
pub fn build() -> anyhow::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("nuclear_war")
        .endpoint("/metrics")
        .build()
        .map_err(|e| anyhow::anyhow!("metrics builder: {e}"))
}
