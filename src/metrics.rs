// src/metrics.rs
use axum::{http::header, routing::get, Router};
use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Content type of the Prometheus text format, version 0.0.4.
pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder and describe the advisor counters.
    /// Fails if a recorder is already installed.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new().install_recorder()?;

        describe_counter!("recommend_requests_total", "Crop recommendation requests");
        describe_counter!(
            "recommend_yield_fallback_total",
            "Yield estimates that fell back to the configured default"
        );
        describe_counter!("weather_requests_total", "Forecast requests");
        describe_counter!(
            "forecast_alerts_total",
            "Forecast entries carrying an alert, by level"
        );
        describe_counter!(
            "provider_errors_total",
            "Failed calls to external providers, by provider"
        );

        Ok(Self { handle })
    }

    /// `/metrics` in the Prometheus text exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let body = handle.render();
                async move { ([(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], body) }
            }),
        )
    }
}
