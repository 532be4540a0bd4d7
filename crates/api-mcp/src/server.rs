//! Request dispatch and the stdio transport.

use std::sync::Arc;

use mch_core::{AncService, ChildHealthService, CoreConfig, QuestionnaireService};
use serde_json::{json, Value};
use tokio::io::BufReader;

use crate::error::{McpError, McpResult};
use crate::jsonrpc::{
    JsonRpcRequest, JsonRpcResponse, INVALID_REQUEST, JSONRPC_VERSION, PARSE_ERROR,
};
use crate::{resources, tools, transport};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "WHO Smart MCP Demo";

/// Tool/resource server over the shared clinical services.
pub struct McpServer {
    pub(crate) anc: AncService,
    pub(crate) child: ChildHealthService,
    pub(crate) questionnaires: QuestionnaireService,
}

impl McpServer {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            anc: AncService::new(cfg.clone()),
            child: ChildHealthService::new(cfg.clone()),
            questionnaires: QuestionnaireService::new(cfg),
        }
    }

    /// Handle one line of input. Returns the serialised response, or `None` for notifications.
    pub fn handle_line(&self, line: &str) -> Option<Value> {
        let raw: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("unparseable message: {e}");
                return to_value(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };

        if !raw.is_object() {
            return to_value(JsonRpcResponse::failure(
                Value::Null,
                INVALID_REQUEST,
                "Invalid request: expected a single JSON object",
            ));
        }

        let id = raw.get("id").cloned();
        let request: JsonRpcRequest = match serde_json::from_value(raw) {
            Ok(request) => request,
            Err(e) => {
                return to_value(JsonRpcResponse::failure(
                    id.unwrap_or(Value::Null),
                    INVALID_REQUEST,
                    format!("Invalid request: {e}"),
                ));
            }
        };

        self.handle_request(request).and_then(to_value)
    }

    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != JSONRPC_VERSION {
            let id = request.id?;
            return Some(JsonRpcResponse::failure(
                id,
                INVALID_REQUEST,
                "Invalid request: jsonrpc must be \"2.0\"",
            ));
        }

        let outcome = self.dispatch(&request.method, request.params);
        let id = match request.id {
            Some(id) => id,
            None => {
                tracing::debug!(method = %request.method, "notification handled");
                return None;
            }
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(err) => {
                tracing::warn!(method = %request.method, code = err.code(), "request failed: {err}");
                JsonRpcResponse::failure(id, err.code(), err.to_string())
            }
        })
    }

    fn dispatch(&self, method: &str, params: Option<Value>) -> McpResult<Value> {
        match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {"tools": {}, "resources": {}},
                "serverInfo": {"name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION")}
            })),
            "ping" => Ok(json!({})),
            "notifications/initialized" => Ok(Value::Null),
            "tools/list" => Ok(json!({"tools": tools::list_tools()})),
            "tools/call" => {
                let params = params.unwrap_or(Value::Null);
                let name = string_param(&params, "name")?;
                tools::call_tool(self, name, params.get("arguments").cloned())
            }
            "resources/list" => Ok(json!({"resources": resources::list_resources()})),
            "resources/read" => {
                let params = params.unwrap_or(Value::Null);
                let uri = string_param(&params, "uri")?;
                resources::read_resource(self, uri)
            }
            other => Err(McpError::UnknownMethod(other.to_string())),
        }
    }

    /// Handle one raw input line. Bytes that are not UTF-8 get a parse error like any other
    /// unreadable message.
    pub fn handle_bytes(&self, bytes: &[u8]) -> Option<Value> {
        match std::str::from_utf8(bytes) {
            Ok(line) => self.handle_line(line),
            Err(e) => {
                tracing::warn!("non UTF-8 message: {e}");
                to_value(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {e}"),
                ))
            }
        }
    }

    /// Serve newline-delimited JSON-RPC on stdin/stdout until stdin closes.
    ///
    /// # Errors
    ///
    /// Returns an error if reading stdin or writing stdout fails.
    pub async fn serve_stdio(self) -> anyhow::Result<()> {
        tracing::info!("-- Serving {} over stdio", SERVER_NAME);
        transport::serve(&self, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
        tracing::info!("stdin closed, stopping");
        Ok(())
    }
}

fn string_param<'a>(params: &'a Value, key: &str) -> McpResult<&'a str> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| McpError::InvalidParams(format!("missing string parameter '{key}'")))
}

fn to_value(response: JsonRpcResponse) -> Option<Value> {
    match serde_json::to_value(response) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!("unserialisable response: {e}");
            None
        }
    }
}
