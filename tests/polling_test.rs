//! Job submission and polling against a mocked backend.

mod fixtures;
mod helpers;

use std::time::Duration;

use browsint_dashboard::config::PollSettings;
use browsint_dashboard::controller::{Region, Submission};
use browsint_dashboard::models::forms::{CrawlForm, DomainForm};
use browsint_dashboard::services::endpoint::Endpoint;
use browsint_dashboard::views::Tone;
use futures::future::join_all;
use serde_json::json;

use fixtures::*;
use helpers::*;

fn crawl_form() -> CrawlForm {
    CrawlForm {
        url: "https://example.com".to_string(),
        depth: Some(2),
    }
}

#[tokio::test]
async fn submitted_crawl_is_polled_once_then_rendered() {
    let t = TestDashboard::with_polling(PollSettings {
        interval: Duration::from_millis(200),
        max_attempts: None,
        timeout: None,
    })
    .await;
    t.mount_json("POST", "/api/crawl/basic", task_created("t-1")).await;
    t.mount_json("GET", "/api/tasks/t-1", basic_crawl_completed()).await;

    let submission = t.dashboard.submit_job(Endpoint::CrawlBasic, &crawl_form()).await;
    let ticket = match submission {
        Submission::Polling(ticket) => ticket,
        other => panic!("expected polling, got {other:?}"),
    };
    assert_eq!(ticket.id, "t-1");
    assert_eq!(ticket.label, "Basic Crawl");
    assert_eq!(t.dashboard.active_jobs(), vec![ticket]);
    assert!(t.view.inner.loading().is_none());

    assert!(wait_for_job(&t.dashboard, "t-1").await);
    assert_eq!(t.hits("/api/tasks/t-1").await, 1);

    let results = t.results();
    assert!(results.contains(r#"<h4 class="text-primary">5</h4>"#));
    assert!(results.contains(r#"<h4 class="text-success">3</h4>"#));
    assert!(results.contains(r#"<h4 class="text-warning">1</h4>"#));
    assert!(t
        .notifications_with(Tone::Success)
        .contains(&"Basic Crawl completed".to_string()));

    // Deregistered before the result was drawn.
    assert_eq!(t.view.active_jobs_at_render(), vec![0]);
}

#[tokio::test]
async fn running_status_keeps_polling() {
    let t = TestDashboard::start().await;
    t.mount_json_times("GET", "/api/tasks/t-run", task_running(), 3).await;
    t.mount_json("GET", "/api/tasks/t-run", basic_crawl_completed()).await;

    t.dashboard.poll_job("t-run", "Basic Crawl");

    assert!(wait_for_job(&t.dashboard, "t-run").await);
    assert_eq!(t.hits("/api/tasks/t-run").await, 4);
    assert!(!t.results().is_empty());
}

#[tokio::test]
async fn unknown_status_is_treated_as_running() {
    let t = TestDashboard::start().await;
    t.mount_json_times("GET", "/api/tasks/t-q", json!({"status": "queued"}), 2)
        .await;
    t.mount_json("GET", "/api/tasks/t-q", username_completed()).await;

    t.dashboard.poll_job("t-q", "Username Search");

    assert!(wait_for_job(&t.dashboard, "t-q").await);
    assert_eq!(t.hits("/api/tasks/t-q").await, 3);
    let results = t.results();
    assert!(results.contains("Username Search"));
    assert!(results.contains(">github</h6>"));
    assert!(!results.contains(">twitter</h6>"));
}

#[tokio::test]
async fn error_status_stops_polling_with_a_message() {
    let t = TestDashboard::start().await;
    t.mount_json("GET", "/api/tasks/t-err", task_failed("boom")).await;

    t.dashboard.poll_job("t-err", "OSINT Crawl");

    assert!(wait_for_job(&t.dashboard, "t-err").await);
    tokio::time::sleep(POLL_INTERVAL * 5).await;
    assert_eq!(t.hits("/api/tasks/t-err").await, 1);
    assert_eq!(
        t.notifications_with(Tone::Error),
        vec!["OSINT Crawl failed: boom".to_string()]
    );
    assert!(t.results().is_empty());
}

#[tokio::test]
async fn transport_failure_stops_polling() {
    let t = TestDashboard::start().await;
    t.mount_status("GET", "/api/tasks/t-gone", 500).await;

    t.dashboard.poll_job("t-gone", "Domain Analysis");

    assert!(wait_for_job(&t.dashboard, "t-gone").await);
    tokio::time::sleep(POLL_INTERVAL * 5).await;
    assert_eq!(t.hits("/api/tasks/t-gone").await, 1);
    let errors = t.notifications_with(Tone::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Error monitoring task"));
}

#[tokio::test]
async fn reregistering_an_id_replaces_the_earlier_poll() {
    let t = TestDashboard::start().await;
    t.mount_json_times("GET", "/api/tasks/t-dup", task_running(), 3).await;
    t.mount_json("GET", "/api/tasks/t-dup", basic_crawl_completed()).await;

    t.dashboard.poll_job("t-dup", "first");
    let ticket = t.dashboard.poll_job("t-dup", "second");
    assert_eq!(t.dashboard.active_jobs(), vec![ticket]);

    assert!(wait_for_job(&t.dashboard, "t-dup").await);
    tokio::time::sleep(POLL_INTERVAL * 5).await;

    // Only the replacement ran: three running answers, then the result.
    assert_eq!(t.hits("/api/tasks/t-dup").await, 4);
    assert_eq!(
        t.notifications_with(Tone::Success),
        vec!["second completed".to_string()]
    );
    assert_eq!(t.view.active_jobs_at_render(), vec![0]);
}

#[tokio::test]
async fn cancelled_job_is_never_rendered() {
    let t = TestDashboard::start().await;
    t.mount_json("GET", "/api/tasks/t-stop", task_running()).await;

    t.dashboard.poll_job("t-stop", "OSINT Crawl");
    let t_ref = &t;
    assert!(wait_until(move || async move { t_ref.hits("/api/tasks/t-stop").await >= 1 }).await);

    assert!(t.dashboard.cancel_job("t-stop"));
    assert!(!t.dashboard.is_polling("t-stop"));
    let seen = t.hits("/api/tasks/t-stop").await;

    tokio::time::sleep(POLL_INTERVAL * 6).await;
    assert!(t.hits("/api/tasks/t-stop").await <= seen + 1);
    assert!(t.results().is_empty());
    assert!(t.notifications_with(Tone::Success).is_empty());
    assert!(t
        .notifications_with(Tone::Info)
        .contains(&"Stopped watching OSINT Crawl".to_string()));

    assert!(!t.dashboard.cancel_job("t-stop"));
}

#[tokio::test]
async fn attempt_limit_ends_a_job_that_never_finishes() {
    let t = TestDashboard::with_polling(PollSettings {
        interval: POLL_INTERVAL,
        max_attempts: Some(3),
        timeout: None,
    })
    .await;
    t.mount_json("GET", "/api/tasks/t-slow", task_running()).await;

    t.dashboard.poll_job("t-slow", "Basic Crawl");

    assert!(wait_for_job(&t.dashboard, "t-slow").await);
    tokio::time::sleep(POLL_INTERVAL * 5).await;
    assert_eq!(t.hits("/api/tasks/t-slow").await, 3);
    let warnings = t.notifications_with(Tone::Warning);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("after 3 checks"));
    assert!(t.results().is_empty());
}

#[tokio::test]
async fn poll_timeout_ends_a_job_that_never_finishes() {
    let t = TestDashboard::with_polling(PollSettings {
        interval: POLL_INTERVAL,
        max_attempts: None,
        timeout: Some(Duration::from_millis(60)),
    })
    .await;
    t.mount_json("GET", "/api/tasks/t-late", task_running()).await;

    t.dashboard.poll_job("t-late", "OSINT Crawl");

    assert!(wait_for_job(&t.dashboard, "t-late").await);
    let seen = t.hits("/api/tasks/t-late").await;
    assert!(seen >= 1);

    tokio::time::sleep(POLL_INTERVAL * 5).await;
    assert_eq!(t.hits("/api/tasks/t-late").await, seen);
    let warnings = t.notifications_with(Tone::Warning);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("OSINT Crawl still running after"));
    assert!(t.results().is_empty());
    assert!(t.view.active_jobs_at_render().is_empty());
}

#[tokio::test]
async fn jobs_finish_independently() {
    let t = TestDashboard::start().await;
    for id in ["a", "b", "c"] {
        t.mount_json("GET", &format!("/api/tasks/{id}"), basic_crawl_completed())
            .await;
    }

    for id in ["a", "b", "c"] {
        t.dashboard.poll_job(id, format!("Crawl {id}"));
    }
    assert_eq!(t.dashboard.active_jobs().len(), 3);

    let finished = join_all(["a", "b", "c"].map(|id| wait_for_job(&t.dashboard, id))).await;
    assert!(finished.into_iter().all(|done| done));
    assert_eq!(t.notifications_with(Tone::Success).len(), 3);
    assert!(t.dashboard.active_jobs().is_empty());
}

#[tokio::test]
async fn response_without_task_id_does_not_poll() {
    let t = TestDashboard::start().await;
    t.mount_json("POST", "/api/osint/domain", json!({"status": "error"}))
        .await;

    let form = DomainForm {
        domain: "example.com".to_string(),
    };
    let submission = t.dashboard.submit_job(Endpoint::OsintDomain, &form).await;

    assert_eq!(
        submission,
        Submission::Rejected("Failed to start Domain Analysis".to_string())
    );
    assert!(t.dashboard.active_jobs().is_empty());
    assert!(t.view.inner.loading().is_none());
    assert!(t.region(Region::Results).is_empty());
}
