//! Error types for assistant operations.

use thiserror::Error;

use crate::types::RunStatus;

/// Errors produced by the assistant client and run orchestration.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("assistant API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for logging.
        body: String,
    },

    /// Response body did not match the expected shape.
    #[error("invalid assistant API response: {0}")]
    InvalidResponse(String),

    /// API key contains characters that are not valid in a header.
    #[error("invalid API key: {0}")]
    InvalidApiKey(String),

    /// The run reached a terminal state other than `completed`.
    #[error("run ended in state {status:?}")]
    RunFailed {
        /// Terminal status reported by the backend.
        status: RunStatus,
    },

    /// The run did not reach a terminal state within the configured wait.
    #[error("run did not complete within {waited_secs} seconds")]
    RunTimedOut {
        /// Seconds waited before giving up.
        waited_secs: u64,
    },

    /// The wait was cancelled from outside.
    #[error("run polling cancelled")]
    Cancelled,
}

/// Result type for assistant operations.
pub type AssistantResult<T> = Result<T, AssistantError>;
