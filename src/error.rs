//! Error types for diffpost

use thiserror::Error;

/// Errors raised anywhere in the submission pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failure (connection, timeout, malformed response)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or parsing failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid pipeline or profile configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Endpoint URL could not be parsed
    #[error("invalid endpoint URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// The transform stage rejected the input
    #[error("transform failed: {0}")]
    Transform(String),

    /// The action destination raised an error
    #[error("action failed: {0}")]
    Action(String),

    /// Confirmation prompt could not be shown
    #[error("confirmation prompt failed: {0}")]
    Prompt(String),

    /// Malformed user input (field specs, headers)
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type alias for diffpost operations
pub type Result<T> = std::result::Result<T, Error>;
