/// Core Server Framework Module
///
/// This module contains the core server implementation including:
/// - config.rs: environment-driven server configuration
/// - error.rs: server and tool error types
/// - greeting.rs: the greeting formatter shared by REST and MCP
/// - rpc.rs: JSON-RPC 2.0 types, tool registry and MCP dispatcher
/// - server.rs: Actix Web routes, middleware and server startup
/// - static_files.rs: static page and asset delivery
/// - utils.rs: environment and timestamp helpers

pub mod config;
pub mod error;
pub mod greeting;
pub mod rpc;
pub mod server;
pub mod static_files;
pub mod utils;
