use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

use crate::models::{
    api_keys::{ActionResponse, ApiKeyListing},
    database::DatabaseInfo,
    forms::ApiKeyForm,
    profile::{ProfileDetail, ProfileList},
    system::SystemStatus,
    task::TaskStatus,
};
use crate::services::endpoint::Endpoint;

/// Formats offered by `GET /api/export/profile/{id}/{format}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Html,
}

/// HTTP client for the Browsint backend API.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BackendError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = Client::builder()
            .user_agent(concat!("browsint-dashboard/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, BackendError> {
        let response = self.http.get(url.clone()).send().await?;
        decode(url, response).await
    }

    async fn post_form<F, T>(&self, url: Url, form: &F) -> Result<T, BackendError>
    where
        F: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.http.post(url.clone()).form(form).send().await?;
        decode(url, response).await
    }

    /// GET /api/status
    pub async fn status(&self) -> Result<SystemStatus, BackendError> {
        self.get_json(self.url(["api", "status"])).await
    }

    /// POST a form to one of the submission endpoints. The raw body is
    /// returned because its shape depends on the endpoint's mode.
    pub async fn submit<F>(&self, endpoint: Endpoint, form: &F) -> Result<Value, BackendError>
    where
        F: Serialize + ?Sized,
    {
        self.post_form(self.url(endpoint.path().split('/')), form).await
    }

    /// GET /api/tasks/{id}
    pub async fn task(&self, task_id: &str) -> Result<TaskStatus, BackendError> {
        let raw: Value = self.get_json(self.url(["api", "tasks", task_id])).await?;
        Ok(TaskStatus::from_value(raw)?)
    }

    /// GET /api/profiles/osint
    pub async fn profiles(&self) -> Result<ProfileList, BackendError> {
        self.get_json(self.url(["api", "profiles", "osint"])).await
    }

    /// GET /api/profiles/osint/{id}
    pub async fn profile(&self, profile_id: i64) -> Result<ProfileDetail, BackendError> {
        let id = profile_id.to_string();
        self.get_json(self.url(["api", "profiles", "osint", id.as_str()]))
            .await
    }

    /// GET /api/database/info
    pub async fn database_info(&self) -> Result<DatabaseInfo, BackendError> {
        self.get_json(self.url(["api", "database", "info"])).await
    }

    /// GET /api/keys
    pub async fn api_keys(&self) -> Result<ApiKeyListing, BackendError> {
        self.get_json(self.url(["api", "keys"])).await
    }

    /// POST /api/keys
    pub async fn save_api_key(&self, form: &ApiKeyForm) -> Result<ActionResponse, BackendError> {
        self.post_form(self.url(["api", "keys"]), form).await
    }

    /// Download link for an exported profile. The dashboard only links to it.
    pub fn export_url(&self, profile_id: i64, format: ExportFormat) -> String {
        let id = profile_id.to_string();
        self.url(["api", "export", "profile", id.as_str(), format.as_ref()])
            .to_string()
    }
}

async fn decode<T: DeserializeOwned>(url: Url, response: reqwest::Response) -> Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        return Err(BackendError::Status {
            status,
            url: url.to_string(),
        });
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status} for {url}")]
    Status { status: StatusCode, url: String },

    #[error("Failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid backend URL: {0}")]
    InvalidBaseUrl(String),
}
