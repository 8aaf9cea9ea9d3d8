//! Client error types

use shared::CheckoutError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error reported by the server
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Checkout rejected locally, nothing was sent
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether the error came from the remote service or the network
    /// (as opposed to local validation)
    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::Checkout(_) | Self::Config(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
