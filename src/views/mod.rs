//! HTML rendering.
//!
//! Every function here is pure: typed data in, [`Fragment`] out. Text that
//! comes from the backend is always escaped before it is interpolated.

pub mod api_keys;
pub mod database;
pub mod page;
pub mod profiles;
pub mod results;
pub mod status;

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use v_htmlescape::escape;

pub use results::{render_result, TaskOutcome};

/// A rendered piece of HTML, ready to be placed into a page region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Fragment(String);

impl Fragment {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Severity of a notification or result panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Error,
    Warning,
    Info,
}

impl Tone {
    pub fn css_class(self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Error => "danger",
            Tone::Warning => "warning",
            Tone::Info => "info",
        }
    }
}

pub fn alert(tone: Tone, message: &str) -> Fragment {
    Fragment::new(format!(
        r#"<div class="alert alert-{}">{}</div>"#,
        tone.css_class(),
        escape(message)
    ))
}

/// Placeholder shown in a region while its data is loading.
pub fn spinner() -> Fragment {
    Fragment::new(r#"<div class="spinner" role="status">Loading...</div>"#)
}

/// Pretty-printed JSON inside a code block.
pub(crate) fn json_block(value: &Value) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    format!(r#"<pre class="code-block">{}</pre>"#, escape(&pretty))
}

pub(crate) fn text_or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => escape(v).to_string(),
        _ => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn alert_escapes_message() {
        let html = alert(Tone::Error, "<script>x</script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("alert-danger"));
    }

    #[test]
    fn json_block_escapes_markup() {
        let html = json_block(&json!({"title": "<b>hi</b>"}));
        assert!(html.contains("&lt;b&gt;hi"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn missing_text_is_na() {
        assert_eq!(text_or_na(None), "N/A");
        assert_eq!(text_or_na(Some("")), "N/A");
        assert_eq!(text_or_na(Some("a&b")), "a&amp;b");
    }
}
