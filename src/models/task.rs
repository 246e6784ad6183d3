use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

/// Lifecycle state reported by `GET /api/tasks/{id}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Running,
    Completed,
    Error,
    /// Anything the backend reports that this client does not know about.
    /// Treated like `Running`: the poll keeps going.
    #[default]
    #[serde(other)]
    Unknown,
}

/// The `type` discriminator of a task document, selecting the result shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ResultKind {
    BasicCrawl,
    OsintCrawl,
    DomainAnalysis,
    EmailAnalysis,
    UsernameAnalysis,
}

impl ResultKind {
    /// Crawls report `stats`, analyses report `profile`.
    pub fn payload_field(self) -> &'static str {
        match self {
            ResultKind::BasicCrawl | ResultKind::OsintCrawl => "stats",
            ResultKind::DomainAnalysis
            | ResultKind::EmailAnalysis
            | ResultKind::UsernameAnalysis => "profile",
        }
    }
}

/// Response to a job-based submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskCreated {
    #[serde(default)]
    pub task_id: Option<String>,
}

/// A task document as returned by `GET /api/tasks/{id}`.
///
/// The raw document is kept alongside the typed view so unknown task types
/// can still be rendered verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskStatus {
    #[serde(default)]
    pub status: JobState,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(skip)]
    raw: Value,
}

impl TaskStatus {
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        let mut status: TaskStatus = serde_json::from_value(raw.clone())?;
        status.raw = raw;
        Ok(status)
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn result_kind(&self) -> Option<ResultKind> {
        self.kind.as_deref().and_then(|k| k.parse().ok())
    }

    /// The value handed to the renderer: `stats` or `profile` for known
    /// kinds, the whole document otherwise.
    pub fn payload(&self) -> &Value {
        match self.result_kind() {
            Some(kind) => self.raw.get(kind.payload_field()).unwrap_or(&Value::Null),
            None => &self.raw,
        }
    }
}
