//! Error types for the seedscan library

use thiserror::Error;

/// Custom error type for seedscan operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Mnemonic error: {0}")]
    Mnemonic(String),

    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Bad response (status {status}): {body}")]
    BadResponse {
        /// HTTP status code returned by the service
        status: u16,
        /// Response body, or a description of why it could not be used
        body: String,
    },

    #[error("Exchange rates unavailable: {0}")]
    RateUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a `BadResponse` for a body that could not be interpreted
    pub(crate) fn bad_body(status: u16, body: &str, reason: impl std::fmt::Display) -> Self {
        Self::BadResponse {
            status,
            body: format!("{} ({})", body, reason),
        }
    }
}

/// Result type for seedscan operations
pub type Result<T> = std::result::Result<T, Error>;
