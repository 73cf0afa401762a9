use std::path::PathBuf;

use crate::state::LinkEntry;

#[derive(Debug, Clone)]
pub struct Config {
    // http server configuration
    /// Port for the API HTTP server.
    pub api_port: u16,

    // namespace configuration
    /// Backends grafted into the namespace before the server starts.
    pub links: Vec<LinkEntry>,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_port: 8080,
            links: Vec::new(),
            log_level: tracing::Level::INFO,
            log_dir: None,
        }
    }
}
