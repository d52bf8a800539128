//! The `get_temperature` tool: validates the arguments and proxies one GET to the backend.

use std::{borrow::Cow, sync::Arc};

use rmcp::model::{CallToolResult, Content, ToolAnnotations};
use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::{backend::Backend, error::ToolError, unit::Unit};

use super::Tool;

pub(crate) struct TemperatureTool {
    backend: Arc<Backend>,
}

impl TemperatureTool {
    pub(crate) fn new(backend: Arc<Backend>) -> Self {
        Self { backend }
    }

    pub(crate) async fn temperature(
        &self,
        arguments: TemperatureArguments,
        ct: &CancellationToken,
    ) -> Result<String, ToolError> {
        let query = arguments.validate()?;
        log::debug!("Normalized unit for '{}' to '{}'", query.location, query.unit);

        let body = self.backend.fetch(&query, ct).await?;

        Ok(format!("Temperature for {}: {body}", query.location))
    }
}

/// Arguments as sent by the client. Values are untyped until [`TemperatureArguments::validate`].
#[derive(Debug, Default, serde::Deserialize)]
pub struct TemperatureArguments {
    #[serde(default)]
    pub location: Option<Value>,
    #[serde(default)]
    pub unit: Option<Value>,
}

/// A validated request for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemperatureQuery {
    pub location: String,
    pub unit: Unit,
}

impl TemperatureArguments {
    pub fn validate(self) -> Result<TemperatureQuery, ToolError> {
        let location = match self.location {
            Some(Value::String(location)) if !location.is_empty() => location,
            _ => {
                return Err(ToolError::InvalidArgument(
                    "location must be a non-empty string".to_string(),
                ));
            }
        };

        let unit = Unit::normalize(self.unit.as_ref().and_then(Value::as_str));

        Ok(TemperatureQuery { location, unit })
    }
}

impl JsonSchema for TemperatureArguments {
    fn schema_name() -> Cow<'static, str> {
        "TemperatureArguments".into()
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        schemars::json_schema!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "Name of the location to get the temperature for"
                },
                "unit": {
                    "type": "string",
                    "description": "Unit system: 'metric' (also 'celsius', 'c') or 'imperial' (also 'fahrenheit', 'f'). Defaults to metric."
                }
            },
            "required": ["location"]
        })
    }
}

impl Tool for TemperatureTool {
    type Parameters = TemperatureArguments;

    fn name() -> &'static str {
        "get_temperature"
    }

    fn description(&self) -> Cow<'_, str> {
        Cow::Borrowed("Get the temperature for a given location")
    }

    fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations::new()
            .read_only(true)
            .destructive(false)
            .idempotent(true)
            .open_world(true)
    }

    async fn call(&self, parameters: Self::Parameters, ct: CancellationToken) -> anyhow::Result<CallToolResult> {
        let text = self.temperature(parameters, &ct).await?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
