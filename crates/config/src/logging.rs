//! Log file configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Directory under `~/Library/Logs` the default log file lives in.
pub const DEFAULT_LOG_DIR_NAME: &str = "mcp-temperature-server";

/// File name of the default log file.
pub const DEFAULT_LOG_FILE_NAME: &str = "server.log";

/// Log file settings. Logs never go to stdout, which carries the MCP stream.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Log file path. Defaults to `~/Library/Logs/mcp-temperature-server/server.log`.
    pub path: Option<PathBuf>,
}

impl LogConfig {
    /// The file logs are appended to, or `None` when no home directory can be resolved.
    pub fn file_path(&self) -> Option<PathBuf> {
        match &self.path {
            Some(path) => Some(path.clone()),
            None => dirs::home_dir().map(|home| {
                home.join("Library")
                    .join("Logs")
                    .join(DEFAULT_LOG_DIR_NAME)
                    .join(DEFAULT_LOG_FILE_NAME)
            }),
        }
    }
}
