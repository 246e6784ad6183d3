//! Test helpers: a dashboard wired to a wiremock backend.
#![allow(dead_code)]

use std::future::Future;
use std::sync::{Arc, Mutex, OnceLock, Weak};
use std::time::Duration;

use browsint_dashboard::config::{DashboardConfig, PollSettings};
use browsint_dashboard::controller::{
    Dashboard, DashboardView, LoadToken, Notification, Region, Section, ViewState,
};
use browsint_dashboard::services::backend::BackendClient;
use browsint_dashboard::views::{Fragment, Tone};
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// View that forwards to a [`ViewState`] and records how many jobs were
/// still registered whenever results were rendered.
pub struct RecordingView {
    pub inner: ViewState,
    dashboard: OnceLock<Weak<Dashboard>>,
    active_at_render: Mutex<Vec<usize>>,
}

impl RecordingView {
    pub fn active_jobs_at_render(&self) -> Vec<usize> {
        self.active_at_render.lock().unwrap().clone()
    }
}

impl DashboardView for RecordingView {
    fn notify(&self, notification: Notification) {
        self.inner.notify(notification);
    }

    fn render(&self, region: Region, fragment: Fragment) {
        if region == Region::Results {
            if let Some(dashboard) = self.dashboard.get().and_then(Weak::upgrade) {
                self.active_at_render
                    .lock()
                    .unwrap()
                    .push(dashboard.active_jobs().len());
            }
        }
        self.inner.render(region, fragment);
    }

    fn begin_loading(&self, message: String) -> LoadToken {
        self.inner.begin_loading(message)
    }

    fn end_loading(&self, token: LoadToken) {
        self.inner.end_loading(token);
    }

    fn set_section(&self, section: Section) {
        self.inner.set_section(section);
    }
}

pub struct TestDashboard {
    pub server: MockServer,
    pub dashboard: Arc<Dashboard>,
    pub view: Arc<RecordingView>,
}

impl TestDashboard {
    pub async fn start() -> Self {
        Self::with_polling(PollSettings {
            interval: POLL_INTERVAL,
            max_attempts: None,
            timeout: None,
        })
        .await
    }

    pub async fn with_polling(polling: PollSettings) -> Self {
        let server = MockServer::start().await;
        let backend = BackendClient::new(&server.uri(), Duration::from_secs(5))
            .expect("mock server uri is a valid base");
        let view = Arc::new(RecordingView {
            inner: ViewState::new(),
            dashboard: OnceLock::new(),
            active_at_render: Mutex::new(Vec::new()),
        });
        let dashboard = Arc::new(Dashboard::new(
            backend,
            view.clone(),
            polling,
            Duration::from_millis(50),
        ));
        let _ = view.dashboard.set(Arc::downgrade(&dashboard));
        Self {
            server,
            dashboard,
            view,
        }
    }

    pub fn results(&self) -> Fragment {
        self.view.inner.region(Region::Results)
    }

    pub fn region(&self, region: Region) -> Fragment {
        self.view.inner.region(region)
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.view.inner.notifications()
    }

    pub fn notifications_with(&self, tone: Tone) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter(|n| n.tone == tone)
            .map(|n| n.message)
            .collect()
    }

    /// Number of requests the backend received for `request_path`.
    pub async fn hits(&self, request_path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == request_path)
            .count()
    }

    pub async fn mount_json(&self, verb: &str, request_path: &str, body: Value) {
        Mock::given(method(verb))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Serve `body` for the first `times` requests only.
    pub async fn mount_json_times(&self, verb: &str, request_path: &str, body: Value, times: u64) {
        Mock::given(method(verb))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .up_to_n_times(times)
            .mount(&self.server)
            .await;
    }

    pub async fn mount_status(&self, verb: &str, request_path: &str, status: u16) {
        Mock::given(method(verb))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    pub fn config(&self) -> DashboardConfig {
        DashboardConfig {
            backend_url: self.server.uri(),
            poll_interval_ms: POLL_INTERVAL.as_millis() as u64,
            ..DashboardConfig::default()
        }
    }
}

/// Poll `condition` until it holds or two seconds pass.
pub async fn wait_until<F, Fut>(mut condition: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while tokio::time::Instant::now() < deadline {
        if condition().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

/// Wait until the dashboard stops polling `job_id`.
pub async fn wait_for_job(dashboard: &Dashboard, job_id: &str) -> bool {
    wait_until(move || async move { !dashboard.is_polling(job_id) }).await
}
