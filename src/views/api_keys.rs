use v_htmlescape::escape;

use crate::models::api_keys::{ApiKeyListing, ApiKeyService, KeyState};
use crate::views::Fragment;

/// One card per known service, with a form to set its key.
pub fn api_key_list(listing: &ApiKeyListing) -> Fragment {
    let cards: String = ApiKeyService::all()
        .map(|service| {
            let (detail, badge) = match listing.state(service) {
                KeyState::Configured(Some(masked)) => {
                    (format!("Configured: {}", escape(&masked)), r#"<span class="badge bg-success">OK</span>"#)
                }
                KeyState::Configured(None) => {
                    ("Configured".to_string(), r#"<span class="badge bg-success">OK</span>"#)
                }
                KeyState::Missing => {
                    ("Not configured".to_string(), r#"<span class="badge bg-warning">Missing</span>"#)
                }
            };
            format!(
                r#"<div class="card api-key">
<div class="card-body"><h6>{title}</h6><small>{detail}</small> {badge}
<form method="post" action="/forms/api-key">
<input type="hidden" name="service" value="{service}">
<input type="password" name="api_key" required placeholder="API key for {service}">
<button type="submit" class="btn btn-sm">Save</button>
</form></div></div>"#,
                title = service.as_ref().to_uppercase(),
            )
        })
        .collect();

    Fragment::new(format!(
        r#"<div class="row"><h6>Configured API keys</h6></div><div class="row">{cards}</div>"#
    ))
}
