use v_htmlescape::escape;

use crate::models::profile::{ProfileList, ProfileSummary};
use crate::services::backend::ExportFormat;
use crate::views::{alert, text_or_na, Fragment, Tone};

/// Table of stored OSINT profiles with view and export actions.
///
/// `export_url` builds the backend download link for a profile.
pub fn profile_list<F>(list: &ProfileList, export_url: F) -> Fragment
where
    F: Fn(i64, ExportFormat) -> String,
{
    if !list.success {
        return alert(
            Tone::Error,
            &format!(
                "Error loading profiles: {}",
                list.error.as_deref().unwrap_or("unknown error")
            ),
        );
    }
    if list.profiles.is_empty() {
        return alert(Tone::Info, "No OSINT profiles found");
    }

    let rows: String = list
        .profiles
        .iter()
        .map(|profile| profile_row(profile, &export_url))
        .collect();

    Fragment::new(format!(
        r#"<table class="table profiles">
<thead><tr><th>ID</th><th>Name</th><th>Type</th><th>Domain</th><th>Sources</th><th>Date</th><th>Actions</th></tr></thead>
<tbody>{rows}</tbody>
</table>"#
    ))
}

fn profile_row<F>(profile: &ProfileSummary, export_url: &F) -> String
where
    F: Fn(i64, ExportFormat) -> String,
{
    let sources = if profile.profile_sources.is_empty() {
        "N/A".to_string()
    } else {
        escape(&profile.profile_sources.join(", ")).to_string()
    };
    format!(
        r#"<tr><td>{id}</td><td>{name}</td><td><span class="badge">{kind}</span></td><td>{domain}</td><td>{sources}</td><td>{date}</td>
<td><a class="btn btn-sm" href="/profiles/{id}">View</a> <a href="{json}">JSON</a> <a href="{html}">HTML</a></td></tr>"#,
        id = profile.id,
        name = text_or_na(profile.name.as_deref()),
        kind = text_or_na(profile.kind.as_deref()),
        domain = text_or_na(profile.domain.as_deref()),
        sources = sources,
        date = text_or_na(profile.created_date().as_deref()),
        json = escape(&export_url(profile.id, ExportFormat::Json)),
        html = escape(&export_url(profile.id, ExportFormat::Html)),
    )
}
