use rmcp::model::{ErrorCode, ErrorData};

/// Everything a `get_temperature` call can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The arguments could not be turned into a query.
    #[error("{0}")]
    InvalidArgument(String),
    /// The request never got a response.
    #[error("failed to query temperature service: {0}")]
    UpstreamUnreachable(#[source] reqwest::Error),
    /// The backend answered with something other than 200 OK.
    #[error("temperature service returned status: {status}")]
    UpstreamError {
        /// Status line, e.g. `500 Internal Server Error`.
        status: String,
    },
    /// The backend said 200 OK but the body could not be read.
    #[error("failed to read response: {0}")]
    UpstreamReadError(#[source] reqwest::Error),
    /// The client cancelled the request before it finished.
    #[error("request was cancelled")]
    Cancelled,
}

impl ToolError {
    /// The JSON-RPC error code this failure is reported with.
    pub fn code(&self) -> ErrorCode {
        match self {
            ToolError::InvalidArgument(_) => ErrorCode::INVALID_PARAMS,
            _ => ErrorCode::INTERNAL_ERROR,
        }
    }
}

impl From<&ToolError> for ErrorData {
    fn from(error: &ToolError) -> Self {
        ErrorData::new(error.code(), error.to_string(), None)
    }
}

impl From<ToolError> for ErrorData {
    fn from(error: ToolError) -> Self {
        ErrorData::from(&error)
    }
}
