/// sayHello Tool
///
/// Exposes the greeting formatter to MCP clients. Takes an optional `name`
/// argument and returns the same message as `POST /api/hello`.

use serde_json::Value;

use crate::core::error::ToolError;
use crate::core::greeting::format_greeting;
use crate::core::rpc::{MCPTool, ToolHandler, ToolRegistry};

pub const TOOL_NAME: &str = "sayHello";

/// Register the sayHello tool with the tool registry.
pub fn register(registry: &mut ToolRegistry) {
    let tool = MCPTool {
        name: TOOL_NAME.to_string(),
        description: "Say hello world with optional name".to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Optional name to personalize the greeting"
                }
            }
        }),
    };

    let handler: ToolHandler = Box::new(say_hello);
    registry.register(tool, handler);
}

/// A `null` name counts as absent; any other non-string value is rejected.
fn say_hello(args: &Value) -> Result<String, ToolError> {
    let name = match args.get("name") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(name.as_str()),
        Some(other) => {
            return Err(ToolError::InvalidArgument {
                name: "name".to_string(),
                reason: format!("expected a string, got {}", other),
            });
        }
    };
    Ok(format_greeting(name))
}
