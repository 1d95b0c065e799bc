//! Core error types for focusdesk-core.
//!
//! Widget operations themselves never fail; these errors come from the
//! capabilities underneath them (stores, config files, the quote endpoint)
//! and are either propagated to the CLI or logged and swallowed.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusdesk-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key/value store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Quote service errors
    #[error("Quote error: {0}")]
    Quote(#[from] QuoteError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key/value store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Store is locked")]
    Locked,

    /// Data directory could not be prepared
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Quote service errors. Always mapped to the fallback quote by
/// [`crate::quote::load_quote`].
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Transport failure (DNS, connect, TLS, timeout, body decode)
    #[error("Quote request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Quote service returned HTTP {0}")]
    Status(u16),

    /// Bounded wait elapsed
    #[error("Quote request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Response did not contain a usable quote
    #[error("Quote response was empty")]
    Empty,
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) => {
                if e.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError. The CLI commands return this.
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
