use std::{ops::Deref, sync::Arc};

use config::Config;
use rmcp::{
    RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, ErrorCode, ErrorData, Implementation, ListToolsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
};

use crate::{
    backend::Backend,
    tool::{RmcpTool, temperature::TemperatureTool},
};

/// The MCP handler serving the temperature tool.
#[derive(Clone)]
pub struct McpServer(Arc<McpServerInner>);

#[doc(hidden)]
pub struct McpServerInner {
    info: ServerInfo,
    tools: Vec<Box<dyn RmcpTool>>,
}

impl Deref for McpServer {
    type Target = McpServerInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl McpServer {
    /// Builds the handler and its backend client from the configuration.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let backend = Arc::new(Backend::new(&config.backend)?);

        let mut server_info = Implementation::from_build_env();
        server_info.name = config.server.name.clone();
        server_info.version = env!("CARGO_PKG_VERSION").to_string();

        let inner = McpServerInner {
            info: ServerInfo {
                protocol_version: ProtocolVersion::V_2025_03_26,
                capabilities: ServerCapabilities::builder().enable_tools().build(),
                server_info,
                instructions: config.server.instructions.clone(),
            },
            tools: vec![Box::new(TemperatureTool::new(backend))],
        };

        log::debug!(
            "Registered tools: {}",
            inner.tools.iter().map(|tool| tool.name()).collect::<Vec<_>>().join(", ")
        );

        Ok(Self(Arc::new(inner)))
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        self.info.clone()
    }

    async fn list_tools(
        &self,
        _: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: self.tools.iter().map(|tool| tool.to_tool()).collect(),
        })
    }

    async fn call_tool(
        &self,
        CallToolRequestParam { name, arguments }: CallToolRequestParam,
        ctx: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        if let Some(tool) = self.tools.iter().find(|tool| tool.name() == name) {
            return tool.call(arguments, ctx).await;
        }

        log::warn!("Client called unknown tool '{name}'");

        Err(ErrorData::new(
            ErrorCode::INVALID_PARAMS,
            format!("Unknown tool '{name}'"),
            None,
        ))
    }
}
