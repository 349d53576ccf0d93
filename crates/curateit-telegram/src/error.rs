//! Error types for the Telegram bot.

use thiserror::Error;

/// Errors produced by the Telegram bot.
#[derive(Debug, Error)]
pub enum BotError {
    /// CurateIt API call failed.
    #[error("curation API error: {0}")]
    Api(#[from] curateit_api::ApiError),

    /// Assistant backend call failed.
    #[error("assistant error: {0}")]
    Assistant(#[from] curateit_assistant::AssistantError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience alias.
pub type BotResult<T> = Result<T, BotError>;
