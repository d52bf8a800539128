//! MCP server exposing a `get_temperature` tool backed by an HTTP temperature service.

#![deny(missing_docs)]

mod backend;
mod error;
mod server;
mod tool;
mod unit;

use config::Config;
use rmcp::ServiceExt;

pub use error::ToolError;
pub use server::McpServer;
pub use unit::{UNIT_ALIASES, Unit};

/// Serves MCP over stdin/stdout until the client closes the stream.
pub async fn serve_stdio(config: &Config) -> anyhow::Result<()> {
    let server = McpServer::new(config)?;

    log::info!(
        "Serving '{}' over stdio, backend at {}",
        config.server.name,
        config.backend.url
    );

    let service = server.serve(rmcp::transport::stdio()).await?;
    let reason = service.waiting().await?;

    log::info!("MCP session ended: {reason:?}");

    Ok(())
}
