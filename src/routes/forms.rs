//! Form posts from the dashboard page. Each one runs the matching controller
//! operation and sends the browser back to `/`.

use axum::extract::State;
use axum::response::Redirect;
use axum::Form;
use garde::Validate;
use serde::Serialize;

use crate::app_state::AppState;
use crate::models::forms::{ApiKeyForm, CrawlForm, DomainForm, EmailForm, UrlForm, UsernameForm};
use crate::services::endpoint::Endpoint;

async fn submit<F>(state: &AppState, endpoint: Endpoint, form: &F) -> Redirect
where
    F: Serialize + Validate<Context = ()>,
{
    let submission = state.dashboard.submit_job(endpoint, form).await;
    tracing::debug!(endpoint = %endpoint, ?submission, "Form handled");
    Redirect::to("/")
}

pub async fn download(State(state): State<AppState>, Form(form): Form<UrlForm>) -> Redirect {
    submit(&state, Endpoint::DownloadSingle, &form).await
}

pub async fn analyze(State(state): State<AppState>, Form(form): Form<UrlForm>) -> Redirect {
    submit(&state, Endpoint::AnalyzePage, &form).await
}

pub async fn crawl(State(state): State<AppState>, Form(form): Form<CrawlForm>) -> Redirect {
    submit(&state, Endpoint::CrawlBasic, &form).await
}

pub async fn osint_crawl(State(state): State<AppState>, Form(form): Form<CrawlForm>) -> Redirect {
    submit(&state, Endpoint::CrawlOsint, &form).await
}

pub async fn domain(State(state): State<AppState>, Form(form): Form<DomainForm>) -> Redirect {
    submit(&state, Endpoint::OsintDomain, &form).await
}

pub async fn email(State(state): State<AppState>, Form(form): Form<EmailForm>) -> Redirect {
    submit(&state, Endpoint::OsintEmail, &form).await
}

pub async fn username(State(state): State<AppState>, Form(form): Form<UsernameForm>) -> Redirect {
    submit(&state, Endpoint::OsintUsername, &form).await
}

/// POST /forms/api-key
pub async fn api_key(State(state): State<AppState>, Form(form): Form<ApiKeyForm>) -> Redirect {
    state.dashboard.save_api_key(form.service, form.api_key).await;
    Redirect::to("/")
}
