//! Error types for Tidings
//!
//! Defines an error enum covering all failure modes across the system.
//! Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Result type alias for Tidings operations
pub type Result<T> = std::result::Result<T, TidingsError>;

/// Comprehensive error type for Tidings operations
#[derive(Error, Debug)]
pub enum TidingsError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication errors (bad or malformed credentials)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Provider fetch errors (network/API failure for one client)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Parsing errors (TOML sections, credential files)
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),

    /// Anyhow errors (for more context)
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}
