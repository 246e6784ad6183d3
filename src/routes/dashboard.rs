use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::Json;

use crate::app_state::AppState;
use crate::controller::{JobTicket, Notification, Section};
use crate::views::page::dashboard_page;

/// GET /: the dashboard rendered from the current view state.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let page = dashboard_page(
        &state.view.snapshot(),
        &state.dashboard.active_jobs(),
        state.page_refresh_secs,
    );
    Html(page.into_string())
}

/// GET /sections/{name}
pub async fn show_section(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Redirect, StatusCode> {
    let section: Section = name.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    state.dashboard.show_section(section).await;
    Ok(Redirect::to("/"))
}

/// GET /profiles/{id}: show a stored profile in the results panel.
pub async fn view_profile(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    state.dashboard.view_profile(id).await;
    Redirect::to("/")
}

pub async fn cancel_job(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    if !state.dashboard.cancel_job(&id) {
        tracing::debug!(job_id = %id, "Cancel requested for a job that is not running");
    }
    Redirect::to("/")
}

pub async fn hide_results(State(state): State<AppState>) -> Redirect {
    state.dashboard.hide_results();
    Redirect::to("/")
}

/// GET /api/notifications: recent notifications, oldest first.
pub async fn notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.view.notifications())
}

/// GET /api/jobs: jobs currently being polled.
pub async fn jobs(State(state): State<AppState>) -> Json<Vec<JobTicket>> {
    Json(state.dashboard.active_jobs())
}
