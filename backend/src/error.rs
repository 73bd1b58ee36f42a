//! Error types for the NeuroScan gateway.
//!
//! - [`ConfigError`] - invalid or missing settings
//! - [`ServerError`] - request handling and upstream failures
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while building the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No prediction service configured.
    #[error("Missing upstream prediction service (set NEUROSCAN_UPSTREAM or --upstream)")]
    MissingUpstream,

    /// Upstream URL is not http(s).
    #[error("Invalid upstream URL: {0}")]
    InvalidUpstream(String),

    /// Static directory does not exist.
    #[error("Static directory not found: {}", .0.display())]
    StaticDirMissing(PathBuf),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server and client errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid request.
    #[error("{0}")]
    BadRequest(String),

    /// The prediction service could not be reached or answered garbage.
    #[error("Prediction failed: {0}")]
    Upstream(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ServerError {
    fn from(err: reqwest::Error) -> Self {
        ServerError::Upstream(err.to_string())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
