pub mod api_keys;
pub mod crawl;
pub mod database;
pub mod forms;
pub mod page;
pub mod profile;
pub mod system;
pub mod task;
