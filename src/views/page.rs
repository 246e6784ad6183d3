//! The whole dashboard document, assembled from a [`ViewSnapshot`].

use strum::IntoEnumIterator;
use v_htmlescape::escape;

use crate::controller::{JobTicket, Region, Section, ViewSnapshot};
use crate::views::Fragment;

const STYLE: &str = r#"body{font-family:system-ui,sans-serif;margin:0;background:#f5f6f8;color:#222}
header{display:flex;justify-content:space-between;align-items:center;padding:.75rem 1.5rem;background:#1f2937;color:#fff}
nav a{color:#cbd5e1;margin-right:1rem;text-decoration:none}nav a.active{color:#fff;font-weight:600}
main{padding:1.5rem;max-width:1100px;margin:auto}
.card{background:#fff;border-radius:6px;padding:1rem;margin-bottom:1rem;box-shadow:0 1px 2px rgba(0,0,0,.08)}
.alert{padding:.6rem 1rem;border-radius:4px;margin:.4rem 0}.alert-success{background:#d1fae5}.alert-danger{background:#fee2e2}
.alert-warning{background:#fef3c7}.alert-info{background:#dbeafe}
.badge{display:inline-block;padding:.15rem .5rem;border-radius:4px;margin:.1rem;color:#fff}
.bg-success{background:#059669}.bg-warning{background:#d97706}.bg-info{background:#2563eb}.bg-secondary{background:#6b7280}
.text-success{color:#059669}.text-danger{color:#dc2626}.text-warning{color:#d97706}.text-primary{color:#2563eb}
.row{display:flex;flex-wrap:wrap;gap:1rem}.stat{flex:1;text-align:center}
.code-block{background:#111827;color:#e5e7eb;padding:.75rem;border-radius:4px;overflow:auto;max-height:400px}
table{border-collapse:collapse;width:100%}td,th{border-bottom:1px solid #e5e7eb;padding:.35rem;text-align:left}
.loading{background:#fef3c7;padding:.5rem 1.5rem}"#;

/// Render the dashboard. While `jobs` is not empty the page reloads itself
/// every `refresh_secs` seconds so finished jobs show up.
pub fn dashboard_page(snapshot: &ViewSnapshot, jobs: &[JobTicket], refresh_secs: u64) -> Fragment {
    let refresh = if jobs.is_empty() {
        String::new()
    } else {
        format!(r#"<meta http-equiv="refresh" content="{}">"#, refresh_secs.max(1))
    };

    // Form posts block until the backend answers, so the banner is mostly
    // seen from other tabs while a submission is in flight.
    let loading = snapshot
        .loading
        .as_deref()
        .map(|message| format!(r#"<div class="loading" role="status">{}</div>"#, escape(message)))
        .unwrap_or_default();

    Fragment::new(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Browsint Dashboard</title>
{refresh}
<style>{STYLE}</style>
</head>
<body>
<header><strong>Browsint</strong> {indicator}</header>
<nav class="card">{nav}</nav>
{loading}
<main>
{notifications}
{jobs}
<section id="section-{section}"><h2>{title}</h2>{body}</section>
{results}
</main>
</body>
</html>"#,
        indicator = snapshot.region(Region::StatusIndicator),
        nav = navigation(snapshot.section),
        notifications = notifications(snapshot),
        jobs = active_jobs(jobs),
        section = snapshot.section,
        title = snapshot.section.title(),
        body = section_body(snapshot),
        results = results(snapshot),
    ))
}

fn navigation(current: Section) -> String {
    Section::iter()
        .map(|section| {
            let class = if section == current { r#" class="active""# } else { "" };
            format!(
                r#"<a href="/sections/{section}"{class}>{}</a>"#,
                section.title()
            )
        })
        .collect()
}

fn notifications(snapshot: &ViewSnapshot) -> String {
    if snapshot.notifications.is_empty() {
        return String::new();
    }
    // Newest first.
    let items: String = snapshot
        .notifications
        .iter()
        .rev()
        .map(|note| {
            format!(
                r#"<div class="alert alert-{}">{}</div>"#,
                note.tone.css_class(),
                escape(&note.message)
            )
        })
        .collect();
    format!(r#"<div class="notifications">{items}</div>"#)
}

/// `/jobs/{id}/cancel` with the id encoded as a single path segment.
fn cancel_path(job_id: &str) -> String {
    format!("/jobs/{}/cancel", urlencoding::encode(job_id))
}

fn active_jobs(jobs: &[JobTicket]) -> String {
    if jobs.is_empty() {
        return String::new();
    }
    let rows: String = jobs
        .iter()
        .map(|job| {
            format!(
                r#"<tr><td>{label}</td><td><code>{id}</code></td><td>
<form method="post" action="{action}"><button type="submit" class="btn btn-sm">Cancel</button></form>
</td></tr>"#,
                label = escape(&job.label),
                id = escape(&job.id),
                action = escape(&cancel_path(&job.id)),
            )
        })
        .collect();
    format!(
        r#"<div class="card jobs"><h6>Running jobs</h6><table><tbody>{rows}</tbody></table></div>"#
    )
}

fn results(snapshot: &ViewSnapshot) -> String {
    let content = snapshot.region(Region::Results);
    if content.is_empty() {
        return String::new();
    }
    format!(
        r#"<div class="card results" id="results">
<form method="post" action="/results/hide"><button type="submit" class="btn btn-sm">Hide</button></form>
{content}</div>"#
    )
}

fn url_form(action: &str, button: &str) -> String {
    format!(
        r#"<form method="post" action="{action}" class="card">
<input type="url" name="url" required placeholder="https://example.com">
<button type="submit">{button}</button>
</form>"#
    )
}

/// `depth` is prefilled with the backend's own default for that crawl.
fn crawl_form(action: &str, button: &str, depth: u32) -> String {
    format!(
        r#"<form method="post" action="{action}" class="card">
<input type="url" name="url" required placeholder="https://example.com">
<input type="number" name="depth" min="1" max="10" value="{depth}">
<button type="submit">{button}</button>
</form>"#
    )
}

fn text_form(action: &str, field: &str, input_type: &str, placeholder: &str, button: &str) -> String {
    format!(
        r#"<form method="post" action="{action}" class="card">
<input type="{input_type}" name="{field}" required placeholder="{placeholder}">
<button type="submit">{button}</button>
</form>"#
    )
}

fn section_body(snapshot: &ViewSnapshot) -> String {
    match snapshot.section {
        Section::Home => format!(
            r#"<div class="card" id="system-status">{}</div>"#,
            snapshot.region(Region::SystemStatus)
        ),
        Section::Download => url_form("/forms/download", "Download"),
        Section::Crawl => format!(
            "<h6>Basic crawl</h6>{}<h6>OSINT crawl</h6>{}",
            crawl_form("/forms/crawl", "Start crawl", 2),
            crawl_form("/forms/osint-crawl", "Start OSINT crawl", 1),
        ),
        Section::Analysis => url_form("/forms/analyze", "Analyze"),
        Section::Osint => format!(
            "{}{}{}",
            text_form("/forms/domain", "domain", "text", "example.com", "Analyze domain"),
            text_form("/forms/email", "email", "email", "user@example.com", "Analyze email"),
            text_form("/forms/username", "username", "text", "username", "Search username"),
        ),
        Section::Profiles => region_card(snapshot, Region::ProfilesList, "profiles"),
        Section::Database => region_card(snapshot, Region::DatabaseInfo, "database"),
        Section::ApiKeys => region_card(snapshot, Region::ApiKeysList, "api-keys"),
    }
}

fn region_card(snapshot: &ViewSnapshot, region: Region, reload: &str) -> String {
    format!(
        r#"<div class="card"><a href="/sections/{reload}">Reload</a>{}</div>"#,
        snapshot.region(region)
    )
}
