//! Client error types.

use thiserror::Error;

use crate::types::Status;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a local file failed (voice uploads).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The service returned an error response.
    #[error("API error ({status}, {error_type}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error type from the service's status block.
        error_type: String,
        /// Error message from the service.
        message: String,
    },

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_)) || matches!(self, Error::Api { status: 404, .. })
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth(_)) || matches!(self, Error::Api { status: 401, .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error response body from the service: a lone `status` block.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorBody {
    pub status: Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_predicates() {
        let err = Error::Api {
            status: 404,
            error_type: "not_found".to_string(),
            message: "no such entity".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_auth_error());
        assert!(!err.is_server_error());

        assert!(Error::Auth("bad token".to_string()).is_auth_error());

        let err = Error::Api {
            status: 500,
            error_type: "internal".to_string(),
            message: "boom".to_string(),
        };
        assert!(err.is_server_error());
    }
}
