mod backend;
mod logs;

pub use backend::{MockBackend, RecordedRequest, TemperatureMock, unreachable_url};
pub use logs::{capture_logs, captured_logs};

use config::Config;
use rmcp::{
    RoleClient, ServiceError,
    model::{CallToolRequestParam, CallToolResult, ErrorData},
    service::{RunningService, ServiceExt},
};

/// Mercury's MCP handler connected to an rmcp client through an in-memory pipe.
pub struct TestServer {
    service: RunningService<RoleClient, ()>,
    _handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with the given TOML configuration
    pub async fn start(config_toml: &str) -> Self {
        let config: Config = toml::from_str(config_toml).unwrap();
        config.validate().unwrap();

        let server = mcp::McpServer::new(&config).unwrap();
        let (server_io, client_io) = tokio::io::duplex(64 * 1024);

        let handle = tokio::spawn(async move {
            let service = server.serve(server_io).await.unwrap();
            let _ = service.waiting().await;
        });

        let service = ().serve(client_io).await.unwrap();

        Self {
            service,
            _handle: handle,
        }
    }

    /// Get server information
    pub fn get_server_info(&self) -> &rmcp::model::InitializeResult {
        self.service.peer_info().unwrap()
    }

    /// List available tools
    pub async fn list_tools(&self) -> rmcp::model::ListToolsResult {
        self.service.list_tools(Default::default()).await.unwrap()
    }

    /// Call a tool with the given name and arguments
    pub async fn call_tool(&self, name: &str, arguments: serde_json::Value) -> CallToolResult {
        self.try_call_tool(name, arguments).await.unwrap()
    }

    /// Call a tool and expect the server to answer with an error
    pub async fn call_tool_expect_error(&self, name: &str, arguments: serde_json::Value) -> ErrorData {
        match self.try_call_tool(name, arguments).await {
            Err(ServiceError::McpError(error)) => error,
            other => unreachable!("expected an MCP error, got {other:?}"),
        }
    }

    /// The text of the first content item of a successful call
    pub async fn call_tool_text(&self, name: &str, arguments: serde_json::Value) -> String {
        let result = self.call_tool(name, arguments).await;
        let result = serde_json::to_value(&result).unwrap();

        result["content"][0]["text"].as_str().unwrap().to_string()
    }

    async fn try_call_tool(&self, name: &str, arguments: serde_json::Value) -> Result<CallToolResult, ServiceError> {
        self.service
            .call_tool(CallToolRequestParam {
                name: name.to_string().into(),
                arguments: arguments.as_object().cloned(),
            })
            .await
    }

    /// Disconnect the client
    pub async fn disconnect(self) {
        self.service.cancel().await.unwrap();
    }
}
