use crate::jsonrpc::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, RESOURCE_NOT_FOUND,
};

/// Protocol-level failure, reported as a JSON-RPC error object.
///
/// Validation failures of a known tool are not protocol errors; they are returned as a tool
/// result with `isError: true`.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Method not found: {0}")]
    UnknownMethod(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error")]
    Internal(#[from] mch_core::ServiceError),
}

pub type McpResult<T> = std::result::Result<T, McpError>;

impl McpError {
    pub fn code(&self) -> i32 {
        match self {
            McpError::UnknownTool(_) | McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::UnknownResource(_) => RESOURCE_NOT_FOUND,
            McpError::UnknownMethod(_) => METHOD_NOT_FOUND,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::Internal(_) => INTERNAL_ERROR,
        }
    }
}
