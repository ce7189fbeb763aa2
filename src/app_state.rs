//! Application state for the Actix-web server
//!
//! `AppState` is wrapped in `web::Data` and shared by every handler. It holds
//! the scraper facade (which owns the upstream client) and the loaded
//! configuration. Nothing in it is mutable after startup.

use crate::config::Config;
use crate::sources::otakudesu::Otakudesu;

/// Shared application state for Actix-web handlers
pub struct AppState {
    /// Page parsers and streaming resolver bound to one upstream client
    pub otakudesu: Otakudesu,
    /// Application configuration
    pub config: Config,
}

impl AppState {
    pub fn new(otakudesu: Otakudesu, config: Config) -> Self {
        Self { otakudesu, config }
    }
}
