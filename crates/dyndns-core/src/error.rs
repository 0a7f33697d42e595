//! Error types for the DynDNS proxy
//!
//! This module defines all error types used throughout the crate.
//!
//! None of these messages ever reach a DynDNS client: the update handler
//! collapses every provider failure into the `911` protocol token and only
//! logs the underlying error.

use thiserror::Error;

/// Result type alias for DynDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DynDNS proxy
#[derive(Error, Debug)]
pub enum Error {
    /// No record matched the requested hostname
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Provider-specific error (non-success status, error envelope, bad payload)
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// HTTP transport errors (connection refused, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(String),

    /// A remote call exceeded its time budget
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Arguments a provider refuses before making a remote call
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Provider response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the provider reported that no record matched.
    ///
    /// Every other variant coming out of a provider is a provider failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
