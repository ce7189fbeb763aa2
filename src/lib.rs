// Library interface for otakudesu_scraper
// This allows the binary and integration tests to share the scraper components

pub mod api;
pub mod app_state;
pub mod config;
pub mod dom;
pub mod error;
pub mod helpers;
pub mod http_client;
pub mod models;
pub mod pagination;
pub mod parsers;
pub mod sources;
pub mod streaming;
