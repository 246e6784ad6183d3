//! Backend response bodies used across the integration tests.
#![allow(dead_code)]

use serde_json::{json, Value};

pub fn task_created(task_id: &str) -> Value {
    json!({ "task_id": task_id, "status": "started" })
}

pub fn task_running() -> Value {
    json!({ "status": "running", "type": "basic_crawl" })
}

pub fn basic_crawl_completed() -> Value {
    json!({
        "status": "completed",
        "type": "basic_crawl",
        "stats": { "urls_visited": 5, "pages_saved": 3, "errors": 1 }
    })
}

pub fn username_completed() -> Value {
    json!({
        "status": "completed",
        "type": "username_analysis",
        "profile": {
            "profiles": {
                "github": { "exists": true, "url": "https://github.com/jdoe" },
                "twitter": { "exists": false, "url": null }
            },
            "summary": { "profiles_found": 1 }
        }
    })
}

pub fn task_failed(reason: &str) -> Value {
    json!({ "status": "error", "type": "osint_crawl", "error": reason })
}

pub fn status_running_bare() -> Value {
    json!({
        "status": "running",
        "api_keys_configured": [],
        "databases_initialized": false
    })
}

pub fn status_running_configured() -> Value {
    json!({
        "status": "running",
        "api_keys_configured": ["shodan", "hibp"],
        "databases_initialized": true
    })
}

pub fn empty_profiles() -> Value {
    json!({ "success": true, "profiles": [] })
}

pub fn profile_detail() -> Value {
    json!({
        "success": true,
        "profile": {
            "id": 7,
            "entity": { "name": "Example Corp", "type": "organization", "domain": "example.com" }
        }
    })
}

pub fn database_info() -> Value {
    json!({
        "success": true,
        "databases": {
            "osint": {
                "size_mb": 1.5,
                "tables": [{ "name": "entities", "rows": 42 }]
            }
        }
    })
}

pub fn api_keys(shodan: Value) -> Value {
    json!({ "api_keys": { "shodan": shodan, "hibp": false } })
}

pub fn download_ok() -> Value {
    json!({ "success": true, "url": "https://example.com", "content_length": 1234 })
}

pub fn analysis_failed() -> Value {
    json!({ "success": false, "error": "Unable to fetch page" })
}
