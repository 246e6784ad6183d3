use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Result of a domain or email analysis, and the shape stored per entity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OsintProfile {
    pub error: Option<String>,
    pub entity: Option<EntityInfo>,
    pub profiles: Option<ProfileSources>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityInfo {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub domain: Option<String>,
}

/// Per-source profile data. Only the sources the dashboard renders are named.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileSources {
    pub domain: Option<SourceData>,
    pub email: Option<SourceData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceData {
    /// Usually an object keyed by provider; a placeholder string when the
    /// stored blob could not be decoded.
    #[serde(default)]
    pub raw: Value,
}

impl SourceData {
    pub fn raw_object(&self) -> Option<&Map<String, Value>> {
        self.raw.as_object()
    }
}

impl OsintProfile {
    pub fn domain_raw(&self) -> Option<&Map<String, Value>> {
        self.profiles
            .as_ref()
            .and_then(|p| p.domain.as_ref())
            .and_then(SourceData::raw_object)
    }

    pub fn email_raw(&self) -> Option<&Map<String, Value>> {
        self.profiles
            .as_ref()
            .and_then(|p| p.email.as_ref())
            .and_then(SourceData::raw_object)
    }
}

/// Result of a username scan across social platforms.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsernameProfile {
    pub error: Option<String>,
    pub profiles: Option<BTreeMap<String, PlatformHit>>,
    pub summary: Option<UsernameSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformHit {
    #[serde(default)]
    pub exists: bool,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsernameSummary {
    pub profiles_found: Option<u64>,
    pub report_file: Option<String>,
}

/// Row of `GET /api/profiles/osint`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSummary {
    pub id: i64,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub domain: Option<String>,
    #[serde(default)]
    pub profile_sources: Vec<String>,
    pub created_at: Option<String>,
}

impl ProfileSummary {
    /// Date part of `created_at`, falling back to the raw string.
    pub fn created_date(&self) -> Option<String> {
        let raw = self.created_at.as_deref()?;
        let parsed = chrono::DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()));
        Some(match parsed {
            Ok(date) => date.format("%Y-%m-%d").to_string(),
            Err(_) => raw.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileList {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub profiles: Vec<ProfileSummary>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileDetail {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub profile: Value,
    pub error: Option<String>,
}
