pub mod backend;
pub mod endpoint;
