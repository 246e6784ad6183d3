use serde::Deserialize;

/// Response to `GET /api/status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub api_keys_configured: Vec<String>,
    #[serde(default)]
    pub databases_initialized: bool,
}

impl SystemStatus {
    pub fn is_online(&self) -> bool {
        self.status == "running"
    }
}
