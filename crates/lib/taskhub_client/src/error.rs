//! Client error types.

use thiserror::Error;

/// Convenience alias for client call results.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the API client and session layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An operation was called from the wrong session state.
    #[error("Invalid session state: {0}")]
    InvalidState(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-2xx response.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}
