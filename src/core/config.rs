/// Server Configuration
///
/// All settings are read from environment variables with defaults suitable
/// for a container deployment. See `ServerConfig::from_env` for the full list.

use actix_web::http::{Uri, header::HeaderValue};
use std::path::PathBuf;

use crate::core::utils::{get_env_flag, get_env_parsed, get_env_var};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Which origins the CORS middleware accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Any origin (`*`)
    Any,
    /// An explicit allow-list
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parse a comma-separated origin list. `*`, or an empty list, means any.
    ///
    /// Entries that are not valid origins are logged and dropped, since a
    /// single bad entry would stop the CORS middleware from building. If
    /// every entry is dropped the list stays empty and no cross-origin
    /// request is allowed.
    pub fn parse(raw: &str) -> Self {
        let entries: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if entries.is_empty() || entries.contains(&"*") {
            return CorsOrigins::Any;
        }

        let origins = entries
            .into_iter()
            .filter(|origin| {
                let valid = is_valid_origin(origin);
                if !valid {
                    tracing::warn!(origin, "ignoring invalid CORS origin");
                }
                valid
            })
            .map(str::to_string)
            .collect();
        CorsOrigins::List(origins)
    }
}

/// Same checks actix-cors applies in `Cors::allowed_origin`.
fn is_valid_origin(origin: &str) -> bool {
    Uri::try_from(origin).is_ok() && HeaderValue::from_str(origin).is_ok()
}

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Listening port
    pub port: u16,
    /// Root directory for static files
    pub public_dir: PathBuf,
    /// MCP `serverInfo.name`
    pub server_name: String,
    /// MCP `serverInfo.version` and REST API version
    pub server_version: String,
    /// Human-readable label reported by `/health`
    pub service_name: String,
    /// Actix worker thread count
    pub workers: usize,
    /// Whether the CORS middleware is installed
    pub cors_enabled: bool,
    /// Origins accepted by CORS
    pub cors_origins: CorsOrigins,
    /// Whether every request is logged
    pub request_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            public_dir: PathBuf::from("public"),
            server_name: "hello-world-gpt-app".to_string(),
            server_version: "1.0.0".to_string(),
            service_name: "Hello World GPT App".to_string(),
            workers: default_workers(),
            cors_enabled: true,
            cors_origins: CorsOrigins::Any,
            request_logging: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// Environment Variables:
    /// - PORT: listening port (default: 3000)
    /// - HOST: bind address (default: "0.0.0.0")
    /// - PUBLIC_DIR: static asset root (default: "public")
    /// - SERVER_NAME / SERVER_VERSION: MCP server info
    /// - SERVICE_NAME: label reported by the health check
    /// - WORKER_THREADS: worker count (default: CPU count, max 16)
    /// - CORS_ENABLED: install CORS middleware (default: true)
    /// - CORS_ALLOWED_ORIGINS: comma-separated origins, `*` for any
    /// - REQUEST_LOGGING: log every request (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: get_env_var("HOST", &defaults.host),
            port: get_env_parsed("PORT", defaults.port),
            public_dir: PathBuf::from(get_env_var(
                "PUBLIC_DIR",
                &defaults.public_dir.to_string_lossy(),
            )),
            server_name: get_env_var("SERVER_NAME", &defaults.server_name),
            server_version: get_env_var("SERVER_VERSION", &defaults.server_version),
            service_name: get_env_var("SERVICE_NAME", &defaults.service_name),
            workers: get_env_parsed("WORKER_THREADS", defaults.workers).max(1),
            cors_enabled: get_env_flag("CORS_ENABLED", defaults.cors_enabled),
            cors_origins: CorsOrigins::parse(&get_env_var("CORS_ALLOWED_ORIGINS", "*")),
            request_logging: get_env_flag("REQUEST_LOGGING", defaults.request_logging),
        }
    }

    /// `host:port` string passed to the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CPU count capped at 16 to avoid excessive context switching.
fn default_workers() -> usize {
    num_cpus::get().clamp(1, 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment_expectations() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.server_name, "hello-world-gpt-app");
        assert_eq!(config.server_version, "1.0.0");
        assert!(config.workers >= 1 && config.workers <= 16);
        assert_eq!(config.cors_origins, CorsOrigins::Any);
    }

    #[test]
    fn cors_wildcard_means_any() {
        assert_eq!(CorsOrigins::parse("*"), CorsOrigins::Any);
        assert_eq!(CorsOrigins::parse(""), CorsOrigins::Any);
        assert_eq!(CorsOrigins::parse("https://a.example, *"), CorsOrigins::Any);
    }

    #[test]
    fn cors_list_drops_invalid_origins() {
        assert_eq!(
            CorsOrigins::parse("https://ok.example, not a url"),
            CorsOrigins::List(vec!["https://ok.example".to_string()])
        );
        assert_eq!(
            CorsOrigins::parse("not a url"),
            CorsOrigins::List(Vec::new())
        );
    }

    #[test]
    fn cors_list_is_trimmed() {
        assert_eq!(
            CorsOrigins::parse(" https://a.example ,https://b.example,, "),
            CorsOrigins::List(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string(),
            ])
        );
    }
}
