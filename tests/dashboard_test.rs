//! Request/render operations of the dashboard against a mocked backend.

mod fixtures;
mod helpers;

use std::time::Duration;

use browsint_dashboard::controller::{DashboardView, Region, Section, Submission};
use browsint_dashboard::models::api_keys::ApiKeyService;
use browsint_dashboard::models::forms::{CrawlForm, EmailForm, UrlForm};
use browsint_dashboard::services::backend::BackendClient;
use browsint_dashboard::services::endpoint::Endpoint;
use browsint_dashboard::views::Tone;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use fixtures::*;
use helpers::*;

#[tokio::test]
async fn running_backend_with_nothing_configured_shows_warnings() {
    let t = TestDashboard::start().await;
    t.mount_json("GET", "/api/status", status_running_bare()).await;

    assert!(t.dashboard.refresh_system_status().await);

    assert!(t.region(Region::StatusIndicator).contains("Online"));
    let panel = t.region(Region::SystemStatus);
    assert!(panel.contains(r#"<span class="badge bg-warning">No API keys configured</span>"#));
    assert!(panel.contains(r#"<span class="badge bg-warning">Not initialized</span>"#));
}

#[tokio::test]
async fn configured_backend_lists_its_keys() {
    let t = TestDashboard::start().await;
    t.mount_json("GET", "/api/status", status_running_configured()).await;

    assert!(t.dashboard.refresh_system_status().await);

    let panel = t.region(Region::SystemStatus);
    assert!(panel.contains("shodan"));
    assert!(panel.contains("hibp"));
    assert!(panel.contains("Initialized"));
    assert!(!panel.contains("No API keys configured"));
}

#[tokio::test]
async fn unreachable_backend_is_offline() {
    let t = TestDashboard::start().await;
    t.mount_status("GET", "/api/status", 503).await;

    assert!(!t.dashboard.refresh_system_status().await);
    assert!(t.region(Region::StatusIndicator).contains("Offline"));
    assert!(t.region(Region::SystemStatus).is_empty());
}

#[tokio::test]
async fn status_refresh_runs_at_once_and_stops_when_cancelled() {
    let t = TestDashboard::start().await;
    t.mount_json("GET", "/api/status", status_running_bare()).await;

    let refresher = t.dashboard.spawn_status_refresh();
    let t_ref = &t;
    assert!(wait_until(move || async move { t_ref.hits("/api/status").await >= 2 }).await);
    assert!(t.region(Region::StatusIndicator).contains("Online"));

    refresher.cancel();
    tokio::time::sleep(Duration::from_millis(20)).await;
    let seen = t.hits("/api/status").await;
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(t.hits("/api/status").await, seen);
}

#[tokio::test]
async fn empty_profile_list_renders_the_empty_state() {
    let t = TestDashboard::start().await;
    t.mount_json("GET", "/api/profiles/osint", empty_profiles()).await;

    t.dashboard.list_profiles().await;

    let html = t.region(Region::ProfilesList);
    assert!(html.contains("No OSINT profiles found"));
    assert!(!html.contains("<table"));
}

#[tokio::test]
async fn profile_detail_goes_to_the_results_panel() {
    let t = TestDashboard::start().await;
    t.mount_json("GET", "/api/profiles/osint/7", profile_detail()).await;
    t.mount_status("GET", "/api/profiles/osint/8", 404).await;

    assert!(t.dashboard.view_profile(7).await);
    assert!(t.results().contains("Example Corp"));
    assert!(t.view.inner.loading().is_none());

    assert!(!t.dashboard.view_profile(8).await);
    assert_eq!(t.notifications_with(Tone::Error).len(), 1);
    assert!(t.view.inner.loading().is_none());
}

#[tokio::test]
async fn missing_profile_reports_the_backend_reason() {
    let t = TestDashboard::start().await;
    t.mount_json(
        "GET",
        "/api/profiles/osint/9",
        json!({"success": false, "error": "Profile 9 not found"}),
    )
    .await;

    assert!(!t.dashboard.view_profile(9).await);
    assert_eq!(
        t.notifications_with(Tone::Error),
        vec!["Profile 9 not found".to_string()]
    );
    assert!(t.results().is_empty());
}

#[tokio::test]
async fn finished_request_leaves_a_concurrent_banner_up() {
    let t = TestDashboard::start().await;
    t.mount_json("POST", "/api/download/single", download_ok()).await;

    // Another request is still in flight.
    let other = t.view.inner.begin_loading("Starting crawler...".to_string());

    let form = UrlForm {
        url: "https://example.com".to_string(),
    };
    assert_eq!(
        t.dashboard.submit_job(Endpoint::DownloadSingle, &form).await,
        Submission::Rendered
    );
    assert_eq!(t.view.inner.loading().as_deref(), Some("Starting crawler..."));

    t.view.inner.end_loading(other);
    assert!(t.view.inner.loading().is_none());
}

#[tokio::test]
async fn entering_a_section_loads_its_data() {
    let t = TestDashboard::start().await;
    t.mount_json("GET", "/api/database/info", database_info()).await;

    t.dashboard.show_section(Section::Database).await;

    assert_eq!(t.view.inner.section(), Section::Database);
    let html = t.region(Region::DatabaseInfo);
    assert!(html.contains("OSINT"));
    assert!(html.contains("1.50 MB"));
    assert!(html.contains("entities"));

    t.dashboard.show_section(Section::Crawl).await;
    assert_eq!(t.view.inner.section(), Section::Crawl);
    assert_eq!(t.server.received_requests().await.unwrap_or_default().len(), 1);
}

#[tokio::test]
async fn saving_a_key_reloads_the_key_list() {
    let t = TestDashboard::start().await;
    t.mount_json(
        "POST",
        "/api/keys",
        json!({"success": true, "message": "API key for shodan updated"}),
    )
    .await;
    t.mount_json("GET", "/api/keys", api_keys(json!("abcd****wxyz"))).await;

    assert!(t.dashboard.save_api_key(ApiKeyService::Shodan, "secret-key").await);

    assert_eq!(t.hits("/api/keys").await, 2);
    let list = t.region(Region::ApiKeysList);
    assert!(list.contains("SHODAN"));
    assert!(list.contains("abcd****wxyz"));
    assert_eq!(
        t.notifications_with(Tone::Success),
        vec!["API key for shodan updated".to_string()]
    );
}

#[tokio::test]
async fn rejected_key_is_reported_without_reload() {
    let t = TestDashboard::start().await;
    t.mount_json(
        "POST",
        "/api/keys",
        json!({"success": false, "error": "unknown service"}),
    )
    .await;

    assert!(!t.dashboard.save_api_key(ApiKeyService::Hibp, "k").await);
    assert!(!t.dashboard.save_api_key(ApiKeyService::Hibp, "").await);

    assert_eq!(t.hits("/api/keys").await, 1);
    assert!(t.region(Region::ApiKeysList).is_empty());
    assert_eq!(t.notifications_with(Tone::Error).len(), 2);
}

#[tokio::test]
async fn download_is_rendered_immediately() {
    let t = TestDashboard::start().await;
    t.mount_json("POST", "/api/download/single", download_ok()).await;

    let form = UrlForm {
        url: "https://example.com".to_string(),
    };
    let submission = t.dashboard.submit_job(Endpoint::DownloadSingle, &form).await;

    assert_eq!(submission, Submission::Rendered);
    assert!(t.dashboard.active_jobs().is_empty());
    assert!(t.results().contains("1234 bytes"));
    assert!(t.view.inner.loading().is_none());
}

#[tokio::test]
async fn failed_page_analysis_is_an_error_message() {
    let t = TestDashboard::start().await;
    t.mount_json("POST", "/api/analyze/page", analysis_failed()).await;

    let form = UrlForm {
        url: "https://example.com".to_string(),
    };
    let submission = t.dashboard.submit_job(Endpoint::AnalyzePage, &form).await;

    assert_eq!(submission, Submission::Rejected("Unable to fetch page".to_string()));
    assert_eq!(
        t.notifications_with(Tone::Error),
        vec!["Error during analysis: Unable to fetch page".to_string()]
    );
    assert!(t.results().is_empty());
    assert!(t.view.inner.loading().is_none());
}

#[tokio::test]
async fn loading_banner_is_cleared_on_every_path() {
    let t = TestDashboard::start().await;
    t.mount_status("POST", "/api/crawl/osint", 502).await;

    let form = CrawlForm {
        url: "https://example.com".to_string(),
        depth: Some(1),
    };
    let submission = t.dashboard.submit_job(Endpoint::CrawlOsint, &form).await;
    assert_eq!(submission, Submission::TransportFailed);
    assert!(t.view.inner.loading().is_none());
    assert!(t.notifications_with(Tone::Error)[0].starts_with("Network error"));

    let invalid = EmailForm {
        email: "not-an-email".to_string(),
    };
    let submission = t.dashboard.submit_job(Endpoint::OsintEmail, &invalid).await;
    assert!(matches!(submission, Submission::Rejected(_)));
    assert!(t.view.inner.loading().is_none());
    assert_eq!(t.hits("/api/osint/email").await, 0);
}

#[tokio::test]
async fn hide_results_clears_the_panel() {
    let t = TestDashboard::start().await;
    t.mount_json("POST", "/api/download/single", download_ok()).await;
    let form = UrlForm {
        url: "https://example.com".to_string(),
    };
    t.dashboard.submit_job(Endpoint::DownloadSingle, &form).await;
    assert!(!t.results().is_empty());

    t.dashboard.hide_results();
    assert!(t.results().is_empty());
}

#[test]
fn backend_url_must_be_a_base() {
    assert_ok!(BackendClient::new("http://127.0.0.1:8000", Duration::from_secs(1)));
    assert_err!(BackendClient::new("mailto:someone@example.com", Duration::from_secs(1)));
}
