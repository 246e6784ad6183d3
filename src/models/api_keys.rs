use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Third-party services the backend holds credentials for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
    EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ApiKeyService {
    Hunterio,
    Hibp,
    Shodan,
    Whoisxml,
    Virustotal,
    Securitytrails,
}

impl ApiKeyService {
    pub fn all() -> impl Iterator<Item = ApiKeyService> {
        ApiKeyService::iter()
    }
}

/// Response to `GET /api/keys`. Values are masked keys or flags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiKeyListing {
    #[serde(default)]
    pub api_keys: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyState {
    Missing,
    /// Configured; carries the masked key when the backend reports one.
    Configured(Option<String>),
}

impl ApiKeyListing {
    pub fn state(&self, service: ApiKeyService) -> KeyState {
        match self.api_keys.get(service.as_ref()) {
            Some(Value::String(masked)) if !masked.is_empty() => {
                KeyState::Configured(Some(masked.clone()))
            }
            Some(Value::Bool(true)) => KeyState::Configured(None),
            _ => KeyState::Missing,
        }
    }
}

/// Generic `{success, message|error}` acknowledgement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}
