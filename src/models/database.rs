use std::collections::BTreeMap;

use serde::Deserialize;

/// Response to `GET /api/database/info`, keyed by database name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseInfo {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub databases: BTreeMap<String, DatabaseDetails>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseDetails {
    pub size_mb: Option<f64>,
    #[serde(default)]
    pub tables: Vec<TableInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableInfo {
    pub name: String,
    #[serde(default)]
    pub rows: u64,
}
