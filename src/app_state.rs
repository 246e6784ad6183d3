use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::controller::{Dashboard, ViewState};
use crate::services::backend::{BackendClient, BackendError};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub view: Arc<ViewState>,
    /// Reload period of the page while jobs are being polled.
    pub page_refresh_secs: u64,
}

impl AppState {
    pub fn new(backend: BackendClient, config: &DashboardConfig) -> Self {
        let view = Arc::new(ViewState::new());
        let polling = config.poll_settings();
        let page_refresh_secs = polling.interval.as_secs().max(1);
        let dashboard = Dashboard::new(
            backend,
            view.clone(),
            polling,
            config.status_refresh_interval(),
        );
        Self {
            dashboard: Arc::new(dashboard),
            view,
            page_refresh_secs,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self, BackendError> {
        let backend = BackendClient::new(&config.backend_url, config.request_timeout())?;
        Ok(Self::new(backend, config))
    }
}
