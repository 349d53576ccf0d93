//! Error types for the CurateIt API client.

use thiserror::Error;

/// Errors produced by CurateIt API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Credentials rejected by the auth endpoint (HTTP 400).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The API returned a non-success status.
    #[error("API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for logging.
        body: String,
    },

    /// Transport-level failure (connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("invalid API response: {0}")]
    InvalidResponse(String),

    /// Bearer token contains characters that are not valid in a header.
    #[error("invalid bearer token: {0}")]
    InvalidToken(String),
}

/// Result type for CurateIt API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_invalid_credentials() {
        assert_eq!(ApiError::InvalidCredentials.to_string(), "invalid credentials");
    }

    #[test]
    fn error_display_status() {
        let err = ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API returned HTTP 500: boom");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    }
}
