use serde::Deserialize;
use serde_json::Value;

/// Statistics reported by a finished basic or OSINT crawl.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrawlStats {
    pub urls_visited: Option<u64>,
    pub pages_saved: Option<u64>,
    pub errors: Option<u64>,
    pub download_path: Option<String>,
    pub osint_summary: Option<OsintSummary>,
}

/// Entities profiled while crawling in OSINT mode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OsintSummary {
    #[serde(default)]
    pub entities_profiled: Vec<ProfiledEntity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfiledEntity {
    pub entity_type: Option<String>,
    /// A single identifier, or a list of them (phone numbers found on a page).
    #[serde(default)]
    pub entity: Value,
    pub page_url: Option<String>,
}

impl ProfiledEntity {
    pub fn entity_label(&self) -> String {
        match &self.entity {
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            Value::Null => "N/A".to_string(),
            other => other.to_string(),
        }
    }
}
