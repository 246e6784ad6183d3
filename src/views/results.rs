use serde::de::DeserializeOwned;
use serde_json::Value;
use v_htmlescape::escape;

use crate::models::{
    crawl::CrawlStats,
    page::{DownloadResult, PageAnalysis},
    profile::{OsintProfile, UsernameProfile},
    task::{ResultKind, TaskStatus},
};
use crate::views::{alert, json_block, text_or_na, Fragment, Tone};

/// A finished task's payload, decoded according to its `type`.
#[derive(Debug, Clone)]
pub enum TaskOutcome {
    BasicCrawl(CrawlStats),
    OsintCrawl(CrawlStats),
    DomainAnalysis(Option<OsintProfile>),
    EmailAnalysis(Option<OsintProfile>),
    UsernameAnalysis(Option<UsernameProfile>),
    /// Unknown kind, or a payload that does not match its kind's shape.
    Unrecognized(Value),
}

impl TaskOutcome {
    pub fn decode(kind: &str, payload: &Value) -> Self {
        let decoded = kind
            .parse::<ResultKind>()
            .ok()
            .and_then(|kind| Self::decode_kind(kind, payload));
        decoded.unwrap_or_else(|| TaskOutcome::Unrecognized(payload.clone()))
    }

    fn decode_kind(kind: ResultKind, payload: &Value) -> Option<Self> {
        Some(match kind {
            ResultKind::BasicCrawl => TaskOutcome::BasicCrawl(nullable(payload)?.unwrap_or_default()),
            ResultKind::OsintCrawl => TaskOutcome::OsintCrawl(nullable(payload)?.unwrap_or_default()),
            ResultKind::DomainAnalysis => TaskOutcome::DomainAnalysis(nullable(payload)?),
            ResultKind::EmailAnalysis => TaskOutcome::EmailAnalysis(nullable(payload)?),
            ResultKind::UsernameAnalysis => TaskOutcome::UsernameAnalysis(nullable(payload)?),
        })
    }

    pub fn render(&self) -> Fragment {
        let html = match self {
            TaskOutcome::BasicCrawl(stats) => crawl_stats(stats),
            TaskOutcome::OsintCrawl(stats) => osint_crawl(stats),
            TaskOutcome::DomainAnalysis(profile) => domain_analysis(profile.as_ref()),
            TaskOutcome::EmailAnalysis(profile) => email_analysis(profile.as_ref()),
            TaskOutcome::UsernameAnalysis(profile) => username_analysis(profile.as_ref()),
            TaskOutcome::Unrecognized(payload) => json_block(payload),
        };
        Fragment::new(html)
    }
}

/// `Some(None)` for null, `Some(Some(_))` when it decodes, `None` when it
/// does not.
fn nullable<T: DeserializeOwned>(payload: &Value) -> Option<Option<T>> {
    if payload.is_null() {
        return Some(None);
    }
    serde_json::from_value(payload.clone()).ok().map(Some)
}

/// Render a task payload of the given kind.
pub fn render_result(kind: &str, payload: &Value) -> Fragment {
    TaskOutcome::decode(kind, payload).render()
}

/// Render a finished task document.
pub fn render_task(status: &TaskStatus) -> Fragment {
    render_result(status.kind.as_deref().unwrap_or_default(), status.payload())
}

/// Wrapper placed in the results region.
pub fn results_panel(title: &str, content: &Fragment, tone: Tone) -> Fragment {
    Fragment::new(format!(
        r#"<div class="result-item result-{tone}"><h6>{title}</h6>{content}</div>"#,
        tone = tone.css_class(),
        title = escape(title),
        content = content,
    ))
}

fn crawl_stats(stats: &CrawlStats) -> String {
    let mut html = format!(
        r#"<div class="row stats">
<div class="stat"><h4 class="text-primary">{}</h4><small>URLs visited</small></div>
<div class="stat"><h4 class="text-success">{}</h4><small>Pages saved</small></div>
<div class="stat"><h4 class="text-warning">{}</h4><small>Errors</small></div>
</div>"#,
        stats.urls_visited.unwrap_or(0),
        stats.pages_saved.unwrap_or(0),
        stats.errors.unwrap_or(0),
    );
    if let Some(path) = stats.download_path.as_deref() {
        html.push_str(&format!(
            r#"<p class="mt-3"><strong>Path:</strong> {}</p>"#,
            escape(path)
        ));
    }
    html
}

fn osint_crawl(stats: &CrawlStats) -> String {
    let mut html = crawl_stats(stats);
    let Some(summary) = stats.osint_summary.as_ref() else {
        return html;
    };

    html.push_str(&format!(
        r#"<div class="mt-4"><h6>OSINT results</h6><p><strong>Entities profiled:</strong> {}</p></div>"#,
        summary.entities_profiled.len()
    ));
    if !summary.entities_profiled.is_empty() {
        html.push_str(r#"<div class="mt-3"><h6>Details:</h6>"#);
        for entity in &summary.entities_profiled {
            html.push_str(&format!(
                r#"<div class="entity"><strong>{}:</strong> {}<br><small>Page: {}</small></div>"#,
                text_or_na(entity.entity_type.as_deref()),
                escape(&entity.entity_label()),
                text_or_na(entity.page_url.as_deref()),
            ));
        }
        html.push_str("</div>");
    }
    html
}

fn analysis_error(error: Option<&str>) -> String {
    alert(
        Tone::Warning,
        &format!("Analysis error: {}", error.unwrap_or("No data available")),
    )
    .into_string()
}

fn source_block(title: &str, value: &Value) -> String {
    format!(
        r#"<div class="source mb-3"><h6>{}</h6>{}</div>"#,
        escape(title),
        json_block(value)
    )
}

fn domain_analysis(profile: Option<&OsintProfile>) -> String {
    let profile = match profile {
        Some(p) if p.error.is_none() => p,
        other => return analysis_error(other.and_then(|p| p.error.as_deref())),
    };

    let mut html = String::from(r#"<div class="row">"#);
    if let Some(entity) = profile.entity.as_ref() {
        html.push_str(&format!(
            r#"<div class="entity-info mb-3"><h6>Entity</h6>
<p><strong>Name:</strong> {}</p>
<p><strong>Type:</strong> {}</p>
<p><strong>Domain:</strong> {}</p></div>"#,
            text_or_na(entity.name.as_deref()),
            text_or_na(entity.kind.as_deref()),
            text_or_na(entity.domain.as_deref()),
        ));
    }
    if let Some(raw) = profile.domain_raw() {
        for (key, title) in [("whois", "WHOIS"), ("dns", "DNS"), ("shodan", "Shodan")] {
            if let Some(value) = raw.get(key).filter(|v| !v.is_null()) {
                html.push_str(&source_block(title, value));
            }
        }
    }
    html.push_str("</div>");
    html
}

fn email_analysis(profile: Option<&OsintProfile>) -> String {
    let profile = match profile {
        Some(p) if p.error.is_none() => p,
        other => return analysis_error(other.and_then(|p| p.error.as_deref())),
    };

    let mut html = String::new();
    if let Some(raw) = profile.email_raw() {
        for (key, title) in [("hunterio", "Hunter.io"), ("breaches", "Data Breaches")] {
            if let Some(value) = raw.get(key).filter(|v| !v.is_null()) {
                html.push_str(&source_block(title, value));
            }
        }
    }
    if html.is_empty() {
        return alert(Tone::Info, "No data available for this email").into_string();
    }
    html
}

fn username_analysis(profile: Option<&UsernameProfile>) -> String {
    let profile = match profile {
        Some(p) if p.error.is_none() => p,
        other => return analysis_error(other.and_then(|p| p.error.as_deref())),
    };

    let mut html = String::new();
    let hits: Vec<_> = profile
        .profiles
        .iter()
        .flatten()
        .filter(|(_, hit)| hit.exists)
        .collect();
    if !hits.is_empty() {
        html.push_str(r#"<div class="mb-3"><h6>Social profiles found</h6><div class="row">"#);
        for (platform, hit) in hits {
            let link = match hit.url.as_deref() {
                Some(url) => format!(
                    r#"<a href="{}" target="_blank" rel="noopener" class="btn btn-sm">Visit</a>"#,
                    escape(url)
                ),
                None => String::new(),
            };
            html.push_str(&format!(
                r#"<div class="card"><h6 class="card-title">{}</h6>{}</div>"#,
                escape(platform),
                link
            ));
        }
        html.push_str("</div></div>");
    }

    if let Some(summary) = profile.summary.as_ref() {
        html.push_str(&format!(
            r#"<div class="mb-3"><h6>Summary</h6><p><strong>Profiles found:</strong> {}</p>"#,
            summary.profiles_found.unwrap_or(0)
        ));
        if let Some(report) = summary.report_file.as_deref() {
            html.push_str(&format!(
                r#"<p><strong>Report file:</strong> {}</p>"#,
                escape(report)
            ));
        }
        html.push_str("</div>");
    }

    if html.is_empty() {
        return alert(Tone::Info, "No social profiles found").into_string();
    }
    html
}

/// Body of a successful single page download.
pub fn download_result(result: &DownloadResult) -> Fragment {
    Fragment::new(format!(
        r#"<p><strong>URL:</strong> {}</p>
<p><strong>Size:</strong> {} bytes</p>
<p class="text-success">Download completed successfully</p>"#,
        text_or_na(result.url.as_deref()),
        result.content_length.unwrap_or(0),
    ))
}

/// Body of a successful page analysis.
pub fn page_analysis(analysis: &PageAnalysis) -> Fragment {
    let parsed = &analysis.parsed_data;
    let osint = &analysis.osint_data;

    let mut html = format!(
        r#"<div class="row">
<div class="col"><h6>Page</h6>
<p><strong>URL:</strong> {url}</p>
<p><strong>Title:</strong> {title}</p>
<p><strong>Description:</strong> {description}</p>
<p><strong>Language:</strong> {lang}</p>
<p><strong>Content size:</strong> {size}</p></div>
<div class="col"><h6>Links</h6>
<p><strong>Total links:</strong> {links}</p>
<p><strong>Internal links:</strong> {internal}</p>
<p><strong>External links:</strong> {external}</p>
<p><strong>Images:</strong> {images}</p>
<p><strong>JS scripts:</strong> {js}</p>
<p><strong>CSS sheets:</strong> {css}</p></div>
</div>"#,
        url = text_or_na(analysis.url.as_deref()),
        title = text_or_na(parsed.title.as_deref()),
        description = text_or_na(parsed.description.as_deref()),
        lang = text_or_na(parsed.lang.as_deref()),
        size = parsed
            .content_length
            .map(|n| format!("{n} bytes"))
            .unwrap_or_else(|| "N/A".to_string()),
        links = parsed.links.len(),
        internal = parsed.internal_links_count.unwrap_or(0),
        external = parsed.external_links_count.unwrap_or(0),
        images = parsed.image_count.unwrap_or(0),
        js = parsed.js_count.unwrap_or(0),
        css = parsed.css_count.unwrap_or(0),
    );

    for (title, items, badge) in [
        ("Emails found", &osint.emails, "info"),
        ("Phone numbers found", &osint.phone_numbers, "warning"),
    ] {
        if items.is_empty() {
            continue;
        }
        let badges: String = items
            .iter()
            .map(|item| format!(r#"<span class="badge bg-{badge}">{}</span>"#, escape(item)))
            .collect();
        html.push_str(&format!(
            r#"<div class="mt-3"><h6>{title}</h6><div class="badges">{badges}</div></div>"#
        ));
    }

    if let Some(tech) = osint.page_technologies.as_ref().filter(|v| !v.is_null()) {
        html.push_str(&format!(
            r#"<div class="mt-3"><h6>Detected technologies</h6>{}</div>"#,
            json_block(tech)
        ));
    }
    Fragment::new(html)
}

/// Stored profile, shown verbatim.
pub fn profile_view(profile: &Value) -> Fragment {
    Fragment::new(format!(r#"<div class="row">{}</div>"#, json_block(profile)))
}
