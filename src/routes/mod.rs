pub mod dashboard;
pub mod forms;
pub mod health;
pub mod metrics;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::compression::CompressionLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Forms carry a URL or a key at most.
const BODY_LIMIT: usize = 64 * 1024;

pub fn router(state: AppState, prometheus: Arc<PrometheusHandle>) -> Router {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/sections/{name}", get(dashboard::show_section))
        .route("/profiles/{id}", get(dashboard::view_profile))
        .route("/jobs/{id}/cancel", post(dashboard::cancel_job))
        .route("/results/hide", post(dashboard::hide_results))
        .route("/forms/download", post(forms::download))
        .route("/forms/analyze", post(forms::analyze))
        .route("/forms/crawl", post(forms::crawl))
        .route("/forms/osint-crawl", post(forms::osint_crawl))
        .route("/forms/domain", post(forms::domain))
        .route("/forms/email", post(forms::email))
        .route("/forms/username", post(forms::username))
        .route("/forms/api-key", post(forms::api_key))
        .route("/api/notifications", get(dashboard::notifications))
        .route("/api/jobs", get(dashboard::jobs))
        .route("/health", get(health::health_check))
        .with_state(state)
        // Prometheus metrics endpoint (separate state)
        .route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(prometheus),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
}
