/// Error types for the server and its tools.

use thiserror::Error;

/// Errors that stop the HTTP server from starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the listening address.
    #[error("failed to bind on {addr}: {source}")]
    Bind {
        /// The address string
        addr: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The server hit an I/O error while running.
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by tool handlers.
///
/// These are reported to JSON-RPC clients as internal errors with the
/// display text attached as `data`.
#[derive(Debug, Error)]
pub enum ToolError {
    /// An argument was present but had the wrong shape.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Argument name
        name: String,
        /// What was wrong with it
        reason: String,
    },
}
