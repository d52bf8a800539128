//! Mercury configuration structures to map the mercury.toml configuration.

#![deny(missing_docs)]

mod backend;
mod loader;
mod logging;
mod server;

use std::path::Path;

pub use backend::{BackendConfig, DEFAULT_API_KEY_ENV, DEFAULT_BACKEND_URL};
pub use logging::{DEFAULT_LOG_DIR_NAME, DEFAULT_LOG_FILE_NAME, LogConfig};
pub use server::ServerConfig;
use serde::Deserialize;

/// Main configuration structure for the Mercury application.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// MCP server identity settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// The temperature service every tool call is proxied to.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Log file settings.
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        loader::load(path)
    }

    /// Validates values serde cannot check on its own.
    pub fn validate(&self) -> anyhow::Result<()> {
        loader::validate_backend(self)
    }
}
