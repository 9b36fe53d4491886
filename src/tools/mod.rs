/// Tools Module
///
/// This module contains all MCP tool implementations. Each tool is implemented
/// as a separate module that exports a `register` function to add the tool to
/// the registry during server initialization.

pub mod say_hello;

use std::sync::Arc;

use crate::core::rpc::ToolRegistry;

/// Build the registry with every available tool.
///
/// Add new tool registrations here following this pattern:
/// `your_tool::register(&mut registry);`
pub fn initialize_tools() -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    say_hello::register(&mut registry);
    Arc::new(registry)
}
