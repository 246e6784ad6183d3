use std::fmt;

use garde::Validate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::api_keys::ApiKeyService;

/// Single page download and page analysis.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UrlForm {
    #[garde(url)]
    pub url: String,
}

/// Basic and OSINT crawls. The backend picks the depth when none is sent.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CrawlForm {
    #[garde(url)]
    pub url: String,

    #[garde(range(min = 1, max = 10))]
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub depth: Option<u32>,
}

/// A cleared number input is posted as `depth=`; treat it as absent.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DomainForm {
    #[garde(length(min = 1, max = 253))]
    pub domain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailForm {
    #[garde(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UsernameForm {
    #[garde(length(min = 1, max = 64))]
    pub username: String,
}

#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct ApiKeyForm {
    #[garde(skip)]
    pub service: ApiKeyService,

    #[garde(length(min = 1, max = 512))]
    pub api_key: String,
}

impl fmt::Debug for ApiKeyForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyForm")
            .field("service", &self.service)
            .field("api_key", &"****")
            .finish()
    }
}
