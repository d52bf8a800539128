pub(crate) mod temperature;

use std::borrow::Cow;

use futures_util::future::BoxFuture;
use rmcp::{
    RoleServer,
    model::{CallToolResult, ErrorCode, ErrorData, JsonObject, ToolAnnotations},
    service::RequestContext,
};
use schemars::{JsonSchema, schema_for};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::ToolError;

pub(crate) trait Tool: Send + Sync + 'static {
    type Parameters: DeserializeOwned + JsonSchema;

    fn name() -> &'static str;
    fn description(&self) -> Cow<'_, str>;
    fn annotations(&self) -> ToolAnnotations;

    fn call(
        &self,
        parameters: Self::Parameters,
        ct: CancellationToken,
    ) -> impl Future<Output = anyhow::Result<CallToolResult>> + Send;
}

pub(crate) trait RmcpTool: Send + Sync + 'static {
    fn name(&self) -> &str;
    fn to_tool(&self) -> rmcp::model::Tool;

    fn call(
        &self,
        parameters: Option<JsonObject>,
        context: RequestContext<RoleServer>,
    ) -> BoxFuture<'_, Result<CallToolResult, ErrorData>>;
}

impl<T: Tool> RmcpTool for T {
    fn name(&self) -> &str {
        T::name()
    }

    fn to_tool(&self) -> rmcp::model::Tool {
        let schema = input_schema::<T::Parameters>(T::name());

        rmcp::model::Tool::new(self.name().to_string(), self.description().into_owned(), schema)
            .annotate(self.annotations())
    }

    fn call(
        &self,
        parameters: Option<JsonObject>,
        context: RequestContext<RoleServer>,
    ) -> BoxFuture<'_, Result<CallToolResult, ErrorData>> {
        let ct = context.ct.clone();

        Box::pin(async move {
            let parameters = Value::Object(parameters.unwrap_or_default());
            log::info!("Tool '{}' received arguments: {parameters}", T::name());

            let parameters: T::Parameters = serde_json::from_value(parameters)
                .map_err(|err| ErrorData::new(ErrorCode::INVALID_PARAMS, err.to_string(), None))?;

            match Tool::call(self, parameters, ct).await {
                Ok(data) => Ok(data),
                Err(err) => {
                    log::error!("Tool '{}' failed: {err}", T::name());

                    if let Some(error) = err.downcast_ref::<ToolError>() {
                        Err(ErrorData::from(error))
                    } else {
                        Err(ErrorData::new(ErrorCode::INTERNAL_ERROR, err.to_string(), None))
                    }
                }
            }
        })
    }
}

/// The published input schema of a tool. Falls back to an empty object, which accepts any arguments.
fn input_schema<P: JsonSchema>(tool: &str) -> JsonObject {
    match serde_json::to_value(schema_for!(P)) {
        Ok(Value::Object(schema)) => schema,
        Ok(other) => {
            log::error!("Input schema of tool '{tool}' is not a JSON object: {other}");
            JsonObject::default()
        }
        Err(err) => {
            log::error!("Failed to serialize the input schema of tool '{tool}': {err}");
            JsonObject::default()
        }
    }
}
