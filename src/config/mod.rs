use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Base URL of the Browsint backend API (e.g., "http://127.0.0.1:8000")
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Address the dashboard web front listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Delay between two status requests for a running job
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Period of the system status refresh
    #[serde(default = "default_status_refresh_secs")]
    pub status_refresh_secs: u64,

    /// Stop watching a job after this many polls. Unset polls until the
    /// backend reports a terminal status.
    #[serde(default)]
    pub max_poll_attempts: Option<u32>,

    /// Stop watching a job after this long. Unset means no limit.
    #[serde(default)]
    pub poll_timeout_secs: Option<u64>,

    /// Per-request timeout for backend calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_status_refresh_secs() -> u64 {
    30
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            bind_addr: default_bind_addr(),
            poll_interval_ms: default_poll_interval_ms(),
            status_refresh_secs: default_status_refresh_secs(),
            max_poll_attempts: None,
            poll_timeout_secs: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Job polling cadence and optional bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: Option<u32>,
    pub timeout: Option<Duration>,
}

impl Default for PollSettings {
    fn default() -> Self {
        DashboardConfig::default().poll_settings()
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config: Self = envy::from_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("POLL_INTERVAL_MS must be greater than zero"));
        }
        if self.status_refresh_secs == 0 {
            return Err(ConfigError::Invalid("STATUS_REFRESH_SECS must be greater than zero"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECS must be greater than zero"));
        }
        if self.max_poll_attempts == Some(0) {
            return Err(ConfigError::Invalid("MAX_POLL_ATTEMPTS must be greater than zero"));
        }
        Ok(())
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_attempts: self.max_poll_attempts,
            timeout: self.poll_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn status_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.status_refresh_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration from environment: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}
