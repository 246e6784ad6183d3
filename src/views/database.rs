use v_htmlescape::escape;

use crate::models::database::DatabaseInfo;
use crate::views::{alert, Fragment, Tone};

pub fn database_info(info: &DatabaseInfo) -> Fragment {
    if !info.success {
        return alert(Tone::Error, "Error loading database information");
    }
    if info.databases.is_empty() {
        return alert(Tone::Info, "No databases reported");
    }

    let mut html = String::from(r#"<div class="row">"#);
    for (name, details) in &info.databases {
        let size = details
            .size_mb
            .map(|mb| format!("{mb:.2} MB"))
            .unwrap_or_else(|| "N/A".to_string());
        let tables: String = if details.tables.is_empty() {
            r#"<tr><td colspan="2">No tables</td></tr>"#.to_string()
        } else {
            details
                .tables
                .iter()
                .map(|t| format!("<tr><td>{}</td><td>{}</td></tr>", escape(&t.name), t.rows))
                .collect()
        };
        html.push_str(&format!(
            r#"<div class="card"><div class="card-header"><h6>{name}</h6></div>
<div class="card-body"><p><strong>Size:</strong> {size}</p><h6>Tables:</h6>
<table class="table table-sm"><thead><tr><th>Name</th><th>Rows</th></tr></thead><tbody>{tables}</tbody></table>
</div></div>"#,
            name = escape(&name.to_uppercase()),
        ));
    }
    html.push_str("</div>");
    Fragment::new(html)
}
