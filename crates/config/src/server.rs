//! MCP server identity settings.

use serde::Deserialize;

/// How the server introduces itself during the MCP handshake.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Server name reported to MCP clients.
    pub name: String,
    /// Optional usage instructions reported to MCP clients.
    pub instructions: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "Temperature Service 🌡️".to_string(),
            instructions: None,
        }
    }
}
