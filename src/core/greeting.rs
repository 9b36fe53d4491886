/// Greeting Formatter
///
/// Pure string formatting shared by the REST endpoint and the `sayHello`
/// MCP tool. Both surfaces must produce byte-identical messages.

use serde::Deserialize;

/// Greeting used when no name is supplied.
pub const DEFAULT_GREETING: &str = "Hello World! 👋 Welcome to GPT App Store!";

/// Body of `POST /api/hello`.
#[derive(Deserialize, Debug, Default)]
pub struct GreetingRequest {
    /// Name to personalize the greeting with
    #[serde(default)]
    pub name: Option<String>,
}

/// Build the greeting for an optional name.
///
/// An absent or empty name yields [`DEFAULT_GREETING`].
pub fn format_greeting(name: Option<&str>) -> String {
    match name {
        Some(name) if !name.is_empty() => {
            format!("Hello, {}! 👋 Welcome to GPT App Store!", name)
        }
        _ => DEFAULT_GREETING.to_string(),
    }
}
