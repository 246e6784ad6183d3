//! Browsint Dashboard
//!
//! Web dashboard for the Browsint OSINT crawling backend. Forms are posted to
//! the backend API, long-running crawls and analyses are polled until they
//! finish, and their results are rendered as server-side HTML.

pub mod app_state;
pub mod config;
pub mod controller;
pub mod models;
pub mod routes;
pub mod services;
pub mod views;
