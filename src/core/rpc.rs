/// MCP JSON-RPC Router
///
/// This module contains the transport-independent part of the MCP protocol:
/// - JSON-RPC 2.0 request/response structures
/// - Tool registry for managing available tools
/// - The dispatcher that maps a request to exactly one response
///
/// The HTTP layer in `server.rs` only decodes bodies and encodes responses.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::ToolError;

/// MCP protocol revision reported by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC 2.0 error codes used by this server.
pub mod error_codes {
    /// Body was not valid JSON
    pub const PARSE_ERROR: i32 = -32700;
    /// Envelope is not a usable request (e.g. no method)
    pub const INVALID_REQUEST: i32 = -32600;
    /// Unknown method or unknown tool
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// A handler failed while processing the request
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// JSON-RPC 2.0 request envelope.
///
/// Every field is optional on input. A missing `method` is answered with an
/// Invalid Request error rather than rejected during decoding, and `jsonrpc`
/// is accepted without validation.
#[derive(Deserialize, Debug, Default)]
pub struct MCPRequest {
    /// JSON-RPC version identifier, normally "2.0"
    #[serde(default)]
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,
    /// Request ID, echoed back verbatim
    #[serde(default)]
    pub id: Option<Value>,
    /// MCP method name (e.g., "initialize", "tools/list", "tools/call")
    #[serde(default)]
    pub method: Option<String>,
    /// Method-specific parameters
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 response envelope.
///
/// Exactly one of `result` and `error` is present. `id` is always serialized,
/// as `null` when the request carried none.
#[derive(Serialize, Debug)]
pub struct MCPResponse {
    /// JSON-RPC version identifier, always "2.0"
    pub jsonrpc: &'static str,
    /// Request ID from the original request
    pub id: Value,
    /// Response result, present when request succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error information, present when request failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MCPError>,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Debug)]
pub struct MCPError {
    /// JSON-RPC error code
    pub code: i32,
    /// Human-readable error message
    pub message: String,
    /// Optional failure detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl MCPResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i32, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(MCPError {
                code,
                message: message.into(),
                data,
            }),
        }
    }

    /// Response for a body that could not be parsed as JSON.
    pub fn parse_error(detail: impl Into<String>) -> Self {
        Self::error(
            Value::Null,
            error_codes::PARSE_ERROR,
            "Parse error",
            Some(Value::String(detail.into())),
        )
    }
}

/// MCP tool definition as advertised by `tools/list`.
#[derive(Serialize, Debug, Clone)]
pub struct MCPTool {
    /// Unique tool identifier
    pub name: String,
    /// Human-readable description of what the tool does
    pub description: String,
    /// JSON Schema defining the tool's input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Tool handler function type.
///
/// Handlers receive the `arguments` object of a `tools/call` request and
/// return the text placed in the response content.
pub type ToolHandler = Box<dyn Fn(&Value) -> Result<String, ToolError> + Send + Sync>;

/// Registry of available MCP tools.
///
/// Tool definitions keep registration order for `tools/list`; handlers are
/// looked up by name for `tools/call`.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<MCPTool>,
    handlers: HashMap<String, ToolHandler>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool definition together with its handler.
    pub fn register(&mut self, tool: MCPTool, handler: ToolHandler) {
        let name = tool.name.clone();
        self.tools.push(tool);
        self.handlers.insert(name, handler);
    }

    /// All registered tool definitions, in registration order.
    pub fn tools(&self) -> &[MCPTool] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&ToolHandler> {
        self.handlers.get(name)
    }
}

/// Identity reported in `initialize` responses.
#[derive(Serialize, Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// Stateless JSON-RPC dispatcher.
///
/// Shared by every worker; each call is independent of every other.
pub struct Dispatcher {
    info: ServerInfo,
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(info: ServerInfo, registry: Arc<ToolRegistry>) -> Self {
        Self { info, registry }
    }

    pub fn server_info(&self) -> &ServerInfo {
        &self.info
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Decode an arbitrary JSON value as a request and handle it.
    ///
    /// Values that are not objects, or whose fields have the wrong types,
    /// are answered with Invalid Request. The `id` is still echoed when it
    /// can be read.
    pub fn handle_value(&self, value: Value) -> MCPResponse {
        if !value.is_object() {
            return MCPResponse::error(
                Value::Null,
                error_codes::INVALID_REQUEST,
                "Invalid Request",
                Some(json!("request must be a JSON object")),
            );
        }

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<MCPRequest>(value) {
            Ok(request) => self.handle(request),
            Err(e) => MCPResponse::error(
                id,
                error_codes::INVALID_REQUEST,
                "Invalid Request",
                Some(Value::String(e.to_string())),
            ),
        }
    }

    /// Route a request to its method handler.
    pub fn handle(&self, request: MCPRequest) -> MCPResponse {
        let MCPRequest {
            id, method, params, ..
        } = request;
        let id = id.unwrap_or(Value::Null);

        let Some(method) = method else {
            tracing::debug!("rejecting request without method");
            return MCPResponse::error(id, error_codes::INVALID_REQUEST, "Invalid Request", None);
        };

        tracing::debug!(method = %method, id = %id, "dispatching JSON-RPC request");

        match method.as_str() {
            "initialize" => self.handle_initialize(id),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, params),
            _ => MCPResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", method),
                None,
            ),
        }
    }

    fn handle_initialize(&self, id: Value) -> MCPResponse {
        MCPResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": self.info
            }),
        )
    }

    fn handle_tools_list(&self, id: Value) -> MCPResponse {
        MCPResponse::success(
            id,
            json!({
                "tools": self.registry.tools()
            }),
        )
    }

    /// Execute a tool. `params.name` selects the tool and `params.arguments`
    /// (default `{}`) is handed to its handler.
    fn handle_tools_call(&self, id: Value, params: Option<Value>) -> MCPResponse {
        let params = params.unwrap_or(Value::Null);
        let tool_name = params.get("name").and_then(Value::as_str).unwrap_or("");
        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        let Some(handler) = self.registry.get(tool_name) else {
            // Non-string names can never match; report them as sent.
            let requested = match params.get("name") {
                Some(Value::String(name)) => name.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };
            return MCPResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Tool not found: {}", requested),
                None,
            );
        };

        match handler(&arguments) {
            Ok(text) => MCPResponse::success(
                id,
                json!({
                    "content": [
                        {
                            "type": "text",
                            "text": text
                        }
                    ]
                }),
            ),
            Err(e) => {
                tracing::warn!(tool = tool_name, error = %e, "tool call failed");
                MCPResponse::error(
                    id,
                    error_codes::INTERNAL_ERROR,
                    "Internal error",
                    Some(Value::String(e.to_string())),
                )
            }
        }
    }
}

/// Whether a decoded body should be treated as a JSON-RPC call.
///
/// Used by the root fallback route, which otherwise serves the web page.
pub fn looks_like_rpc(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key("jsonrpc") || obj.contains_key("method"))
}
