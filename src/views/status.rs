use v_htmlescape::escape;

use crate::models::system::SystemStatus;
use crate::views::Fragment;

pub fn status_indicator(online: bool) -> Fragment {
    if online {
        Fragment::new(r#"<span class="indicator text-success">&#9679; Online</span>"#)
    } else {
        Fragment::new(r#"<span class="indicator text-danger">&#9679; Offline</span>"#)
    }
}

/// Configured API keys and database state.
pub fn system_status(status: &SystemStatus) -> Fragment {
    let keys = if status.api_keys_configured.is_empty() {
        r#"<span class="badge bg-warning">No API keys configured</span>"#.to_string()
    } else {
        status
            .api_keys_configured
            .iter()
            .map(|key| format!(r#"<span class="badge bg-success">{}</span>"#, escape(key)))
            .collect()
    };

    let (db_class, db_label) = if status.databases_initialized {
        ("bg-success", "Initialized")
    } else {
        ("bg-warning", "Not initialized")
    };

    Fragment::new(format!(
        r#"<div class="row">
<div class="col"><h6>Configured API keys</h6><div class="badges">{keys}</div></div>
<div class="col"><h6>Databases</h6><span class="badge {db_class}">{db_label}</span></div>
</div>"#
    ))
}
