use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use browsint_dashboard::app_state::AppState;
use browsint_dashboard::config::DashboardConfig;
use browsint_dashboard::routes;

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config =
        DashboardConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!(backend_url = %config.backend_url, "Initializing browsint dashboard");

    // Initialize Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);

    metrics::describe_counter!(
        "dashboard_jobs_submitted_total",
        "Forms submitted to the backend, by endpoint"
    );
    metrics::describe_counter!(
        "dashboard_jobs_finished_total",
        "Polled jobs that stopped being watched, by outcome"
    );
    metrics::describe_counter!(
        "dashboard_polls_total",
        "Task status requests issued while polling"
    );
    metrics::describe_gauge!(
        "dashboard_active_jobs",
        "Jobs currently being polled"
    );

    let state = AppState::from_config(&config).expect("Invalid BACKEND_URL");

    // Status indicator: once now, then periodically
    let status_refresh = state.dashboard.spawn_status_refresh();
    let dashboard = state.dashboard.clone();

    let app = routes::router(state, prometheus_handle);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    status_refresh.cancel();
    let cancelled = dashboard.cancel_all_jobs();
    tracing::info!(cancelled, "Dashboard stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
            let _ = sigterm.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
