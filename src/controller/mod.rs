//! Dashboard controller: form submissions, job polling and rendering.

mod poller;
pub mod registry;
pub mod view;

use std::sync::Arc;
use std::time::Duration;

use garde::Validate;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::oneshot;
use tokio::time::{self, MissedTickBehavior};

use crate::config::PollSettings;
use crate::models::{
    api_keys::ApiKeyService,
    forms::ApiKeyForm,
    page::{DownloadResult, PageAnalysis},
    task::TaskCreated,
};
use crate::services::backend::{BackendClient, BackendError};
use crate::services::endpoint::{Endpoint, Mode};
use crate::views::{self, alert, results, Fragment, Tone};

use poller::Terminal;
pub use registry::{JobRegistry, JobTicket, PollExit, ScopedTask};
pub use view::{
    DashboardView, LoadToken, Notification, Region, Section, ViewSnapshot, ViewState,
};

/// What became of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The backend accepted a job; it is now being polled.
    Polling(JobTicket),
    /// An immediate endpoint answered and its result was rendered.
    Rendered,
    /// Invalid form, or the backend declined the request.
    Rejected(String),
    /// The request never produced a usable response.
    TransportFailed,
}

/// The dashboard controller. Built once at startup and shared behind an `Arc`.
pub struct Dashboard {
    backend: BackendClient,
    view: Arc<dyn DashboardView>,
    jobs: JobRegistry,
    polling: PollSettings,
    status_refresh: Duration,
}

/// Keeps this operation's loading message up for as long as it lives.
struct LoadingGuard<'a> {
    view: &'a dyn DashboardView,
    token: LoadToken,
}

impl<'a> LoadingGuard<'a> {
    fn show(view: &'a dyn DashboardView, message: &str) -> Self {
        let token = view.begin_loading(message.to_string());
        Self { view, token }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.view.end_loading(self.token);
    }
}

impl Dashboard {
    pub fn new(
        backend: BackendClient,
        view: Arc<dyn DashboardView>,
        polling: PollSettings,
        status_refresh: Duration,
    ) -> Self {
        Self {
            backend,
            view,
            jobs: JobRegistry::new(),
            polling,
            status_refresh,
        }
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    pub fn poll_settings(&self) -> &PollSettings {
        &self.polling
    }

    pub fn active_jobs(&self) -> Vec<JobTicket> {
        self.jobs.tickets()
    }

    pub fn is_polling(&self, job_id: &str) -> bool {
        self.jobs.contains(job_id)
    }

    fn record_active_jobs(&self) {
        metrics::gauge!("dashboard_active_jobs").set(self.jobs.len() as f64);
    }

    fn network_error(&self, context: &str, error: &BackendError) -> Submission {
        tracing::warn!(error = %error, context, "Backend request failed");
        self.view
            .notify(Notification::error(format!("Network error: {error}")));
        Submission::TransportFailed
    }

    /// Validate a form and post it to `endpoint`.
    ///
    /// Job endpoints start polling the returned `task_id`; immediate
    /// endpoints render their answer straight away.
    pub async fn submit_job<F>(self: &Arc<Self>, endpoint: Endpoint, form: &F) -> Submission
    where
        F: Serialize + Validate<Context = ()>,
    {
        if let Err(report) = form.validate() {
            let reason = report.to_string();
            tracing::debug!(endpoint = %endpoint, %reason, "Rejected invalid form");
            self.view.notify(Notification::error(format!(
                "Invalid {} request: {reason}",
                endpoint.label()
            )));
            return Submission::Rejected(reason);
        }

        let endpoint_name: &'static str = endpoint.into();
        metrics::counter!("dashboard_jobs_submitted_total", "endpoint" => endpoint_name)
            .increment(1);
        tracing::info!(endpoint = endpoint_name, "Submitting form");

        let _loading = LoadingGuard::show(self.view.as_ref(), endpoint.loading_text());
        let body = match self.backend.submit(endpoint, form).await {
            Ok(body) => body,
            Err(e) => return self.network_error(endpoint.label(), &e),
        };

        match endpoint.mode() {
            Mode::Job => self.start_polling(endpoint, body),
            Mode::Immediate => self.show_immediate(endpoint, body),
        }
    }

    fn start_polling(self: &Arc<Self>, endpoint: Endpoint, body: Value) -> Submission {
        let created: TaskCreated = serde_json::from_value(body).unwrap_or_default();
        match created.task_id {
            Some(task_id) if !task_id.is_empty() => {
                self.view
                    .notify(Notification::success(format!("{} started", endpoint.label())));
                Submission::Polling(self.poll_job(task_id, endpoint.label()))
            }
            _ => {
                let reason = format!("Failed to start {}", endpoint.label());
                tracing::warn!(endpoint = %endpoint, "Submission response carried no task_id");
                self.view.notify(Notification::error(reason.clone()));
                Submission::Rejected(reason)
            }
        }
    }

    fn show_immediate(&self, endpoint: Endpoint, body: Value) -> Submission {
        if endpoint == Endpoint::AnalyzePage {
            let analysis: PageAnalysis = match serde_json::from_value(body) {
                Ok(analysis) => analysis,
                Err(e) => return self.network_error(endpoint.label(), &e.into()),
            };
            if !analysis.success {
                let reason = analysis.error.unwrap_or_else(|| "unknown error".to_string());
                self.view
                    .notify(Notification::error(format!("Error during analysis: {reason}")));
                return Submission::Rejected(reason);
            }
            self.view.notify(Notification::success("Analysis completed"));
            self.view.render(
                Region::Results,
                results::results_panel(
                    "Page analysis completed",
                    &results::page_analysis(&analysis),
                    Tone::Success,
                ),
            );
            return Submission::Rendered;
        }

        let download: DownloadResult = match serde_json::from_value(body) {
            Ok(download) => download,
            Err(e) => return self.network_error(endpoint.label(), &e.into()),
        };
        if !download.success {
            let reason = download.error.unwrap_or_else(|| "unknown error".to_string());
            self.view
                .notify(Notification::error(format!("Error during download: {reason}")));
            return Submission::Rejected(reason);
        }
        self.view.notify(Notification::success(format!(
            "Page downloaded successfully ({} bytes)",
            download.content_length.unwrap_or(0)
        )));
        self.view.render(
            Region::Results,
            results::results_panel(
                "Download completed",
                &results::download_result(&download),
                Tone::Info,
            ),
        );
        Submission::Rendered
    }

    /// Start watching a job. A poll already running for the same id is
    /// replaced.
    pub fn poll_job(
        self: &Arc<Self>,
        job_id: impl Into<String>,
        label: impl Into<String>,
    ) -> JobTicket {
        let ticket = JobTicket {
            id: job_id.into(),
            label: label.into(),
        };
        let generation = self.jobs.next_generation();
        let (start_tx, start_rx) = oneshot::channel();
        let task = tokio::spawn(poller::run(
            Arc::clone(self),
            ticket.clone(),
            generation,
            start_rx,
        ));

        if self.jobs.insert(&ticket, generation, ScopedTask::new(task)) {
            tracing::info!(job_id = %ticket.id, "Replaced existing poll for job");
        } else {
            tracing::info!(job_id = %ticket.id, label = %ticket.label, "Watching job");
        }
        // The task may only deregister itself once it is registered.
        let _ = start_tx.send(());
        self.record_active_jobs();
        ticket
    }

    /// Deregister a finished job, then tell the user about it.
    fn finish_job(&self, ticket: &JobTicket, generation: u64, terminal: Terminal) -> PollExit {
        if !self.jobs.release(&ticket.id, generation) {
            tracing::debug!(job_id = %ticket.id, "Poll ended after being cancelled or replaced");
            return PollExit::Superseded;
        }
        self.record_active_jobs();

        let exit = match terminal {
            Terminal::Completed(status) => {
                tracing::info!(job_id = %ticket.id, kind = ?status.kind, "Job completed");
                self.view
                    .notify(Notification::success(format!("{} completed", ticket.label)));
                let content = results::render_task(&status);
                self.view.render(
                    Region::Results,
                    results::results_panel(&ticket.label, &content, Tone::Success),
                );
                PollExit::Completed
            }
            Terminal::Failed(status) => {
                let reason = status.error.as_deref().unwrap_or("unknown error");
                tracing::warn!(job_id = %ticket.id, error = reason, "Job failed");
                self.view.notify(Notification::error(format!(
                    "{} failed: {reason}",
                    ticket.label
                )));
                PollExit::Failed
            }
            Terminal::Transport(e) => {
                tracing::warn!(job_id = %ticket.id, error = %e, "Stopped polling after request failure");
                self.view
                    .notify(Notification::error(format!("Error monitoring task: {e}")));
                PollExit::TransportError
            }
            Terminal::TimedOut { attempts } => {
                tracing::warn!(job_id = %ticket.id, attempts, "Job still running, giving up");
                self.view.notify(Notification::warning(format!(
                    "{} still running after {attempts} checks; stopped watching it",
                    ticket.label
                )));
                PollExit::TimedOut
            }
        };

        let outcome: &'static str = exit.into();
        metrics::counter!("dashboard_jobs_finished_total", "outcome" => outcome).increment(1);
        exit
    }

    /// Stop watching a job. Returns false if it was not being watched.
    pub fn cancel_job(&self, job_id: &str) -> bool {
        let Some(ticket) = self.jobs.cancel(job_id) else {
            return false;
        };
        self.record_active_jobs();
        tracing::info!(job_id = %ticket.id, "Job polling cancelled");
        self.view
            .notify(Notification::info(format!("Stopped watching {}", ticket.label)));
        true
    }

    /// Stop every poll. Used when the dashboard shuts down.
    pub fn cancel_all_jobs(&self) -> usize {
        let cancelled = self.jobs.cancel_all();
        self.record_active_jobs();
        cancelled
    }

    /// Fetch `/api/status` and update the indicator. Returns whether the
    /// backend reported itself as running.
    pub async fn refresh_system_status(&self) -> bool {
        match self.backend.status().await {
            Ok(status) if status.is_online() => {
                self.view
                    .render(Region::StatusIndicator, views::status::status_indicator(true));
                self.view
                    .render(Region::SystemStatus, views::status::system_status(&status));
                true
            }
            Ok(status) => {
                tracing::info!(status = %status.status, "Backend reports not running");
                self.view
                    .render(Region::StatusIndicator, views::status::status_indicator(false));
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Status check failed");
                self.view
                    .render(Region::StatusIndicator, views::status::status_indicator(false));
                false
            }
        }
    }

    /// Refresh the system status now and then periodically until the
    /// returned handle is cancelled or dropped.
    pub fn spawn_status_refresh(self: &Arc<Self>) -> ScopedTask<()> {
        let dashboard = Arc::clone(self);
        let period = self.status_refresh;
        ScopedTask::new(tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                dashboard.refresh_system_status().await;
            }
        }))
    }

    pub async fn list_profiles(&self) {
        self.view.render(Region::ProfilesList, views::spinner());
        let fragment = match self.backend.profiles().await {
            Ok(list) => views::profiles::profile_list(&list, |id, format| {
                self.backend.export_url(id, format)
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load profiles");
                alert(Tone::Error, "Error loading profiles")
            }
        };
        self.view.render(Region::ProfilesList, fragment);
    }

    /// Show one stored profile in the results region.
    pub async fn view_profile(&self, profile_id: i64) -> bool {
        let _loading = LoadingGuard::show(self.view.as_ref(), "Loading profile...");
        match self.backend.profile(profile_id).await {
            Ok(detail) if detail.success && !detail.profile.is_null() => {
                self.view.render(
                    Region::Results,
                    results::results_panel(
                        &format!("OSINT profile #{profile_id}"),
                        &results::profile_view(&detail.profile),
                        Tone::Info,
                    ),
                );
                true
            }
            Ok(detail) => {
                let reason = detail.error.unwrap_or_else(|| "Profile not found".to_string());
                self.view.notify(Notification::error(reason));
                false
            }
            Err(e) => {
                tracing::warn!(profile_id, error = %e, "Failed to load profile");
                self.view
                    .notify(Notification::error(format!("Error loading profile: {e}")));
                false
            }
        }
    }

    pub async fn list_databases(&self) {
        self.view.render(Region::DatabaseInfo, views::spinner());
        let fragment = match self.backend.database_info().await {
            Ok(info) => views::database::database_info(&info),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load database info");
                alert(Tone::Error, "Network error while loading database information")
            }
        };
        self.view.render(Region::DatabaseInfo, fragment);
    }

    pub async fn list_api_keys(&self) {
        self.view.render(Region::ApiKeysList, views::spinner());
        let fragment = match self.backend.api_keys().await {
            Ok(listing) => views::api_keys::api_key_list(&listing),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load API keys");
                alert(Tone::Error, "Error loading API keys")
            }
        };
        self.view.render(Region::ApiKeysList, fragment);
    }

    /// Store a key for `service`. On success the key list is reloaded.
    pub async fn save_api_key(&self, service: ApiKeyService, api_key: impl Into<String>) -> bool {
        let form = ApiKeyForm {
            service,
            api_key: api_key.into(),
        };
        if let Err(report) = form.validate() {
            self.view
                .notify(Notification::error(format!("Invalid API key: {report}")));
            return false;
        }

        match self.backend.save_api_key(&form).await {
            Ok(ack) if ack.success => {
                tracing::info!(%service, "API key updated");
                let message = ack
                    .message
                    .unwrap_or_else(|| format!("API key for {service} updated"));
                self.view.notify(Notification::success(message));
                self.list_api_keys().await;
                true
            }
            Ok(ack) => {
                let reason = ack.error.unwrap_or_else(|| "unknown error".to_string());
                self.view
                    .notify(Notification::error(format!("Error: {reason}")));
                false
            }
            Err(e) => {
                self.network_error("save_api_key", &e);
                false
            }
        }
    }

    /// Switch section, loading the data it shows.
    pub async fn show_section(&self, section: Section) {
        self.view.set_section(section);
        match section {
            Section::Profiles => self.list_profiles().await,
            Section::Database => self.list_databases().await,
            Section::ApiKeys => self.list_api_keys().await,
            _ => {}
        }
    }

    pub fn hide_results(&self) {
        self.view.render(Region::Results, Fragment::empty());
    }
}
