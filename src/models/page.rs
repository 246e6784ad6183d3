use serde::Deserialize;
use serde_json::Value;

/// Response to `POST /api/download/single`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DownloadResult {
    #[serde(default)]
    pub success: bool,
    pub url: Option<String>,
    pub content_length: Option<u64>,
    pub error: Option<String>,
}

/// Response to `POST /api/analyze/page`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageAnalysis {
    #[serde(default)]
    pub success: bool,
    pub url: Option<String>,
    #[serde(default)]
    pub parsed_data: ParsedPage,
    #[serde(default)]
    pub osint_data: PageOsint,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParsedPage {
    pub title: Option<String>,
    pub description: Option<String>,
    pub lang: Option<String>,
    pub content_length: Option<u64>,
    #[serde(default)]
    pub links: Vec<Value>,
    pub internal_links_count: Option<u64>,
    pub external_links_count: Option<u64>,
    pub image_count: Option<u64>,
    pub js_count: Option<u64>,
    pub css_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageOsint {
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub phone_numbers: Vec<String>,
    pub page_technologies: Option<Value>,
}
