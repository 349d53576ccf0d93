//! Configuration for the Telegram bot, loaded from environment variables.

use std::time::Duration;

use tracing::warn;

use crate::error::{BotError, BotResult};

const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
const DEFAULT_RUN_TIMEOUT_SECS: u64 = 120;

/// Bot configuration.
#[derive(Clone)]
pub struct BotConfig {
    /// Telegram Bot API token (from `@BotFather`).
    pub bot_token: String,
    /// OpenAI API key for the assistant backend.
    pub openai_api_key: String,
    /// CurateIt API base URL, no trailing slash (e.g. `https://api.curateit.com`).
    pub curateit_api_url: String,
    /// Pre-provisioned assistant id.
    pub assistant_id: String,
    /// Optional fixed target collection for saved links. When unset, the
    /// user's first collection is used.
    pub collection_id: Option<i64>,
    /// Delay between run-status polls.
    pub poll_interval: Duration,
    /// Maximum wall-clock wait for one assistant run.
    pub run_timeout: Duration,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &"[REDACTED]")
            .field("openai_api_key", &"[REDACTED]")
            .field("curateit_api_url", &self.curateit_api_url)
            .field("assistant_id", &self.assistant_id)
            .field("collection_id", &self.collection_id)
            .field("poll_interval", &self.poll_interval)
            .field("run_timeout", &self.run_timeout)
            .finish()
    }
}

impl BotConfig {
    /// Load configuration from environment variables.
    ///
    /// Required: `TELEGRAM_TOKEN`, `OPENAI_API_KEY`, `CURATEIT_API_URL`,
    /// `CURATEIT_ASSISTANT_ID`.
    /// Optional: `CURATEIT_COLLECTION_ID`, `RUN_POLL_INTERVAL_MS`
    /// (default 500), `RUN_TIMEOUT_SECS` (default 120).
    pub fn load() -> BotResult<Self> {
        Ok(Self {
            bot_token: required_var("TELEGRAM_TOKEN")?,
            openai_api_key: required_var("OPENAI_API_KEY")?,
            curateit_api_url: required_var("CURATEIT_API_URL")?
                .trim_end_matches('/')
                .to_string(),
            assistant_id: required_var("CURATEIT_ASSISTANT_ID")?,
            collection_id: optional_parsed_var("CURATEIT_COLLECTION_ID"),
            poll_interval: Duration::from_millis(
                optional_parsed_var("RUN_POLL_INTERVAL_MS").unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            ),
            run_timeout: Duration::from_secs(
                optional_parsed_var("RUN_TIMEOUT_SECS").unwrap_or(DEFAULT_RUN_TIMEOUT_SECS),
            ),
        })
    }
}

fn required_var(name: &str) -> BotResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(BotError::Config(format!("{name} is not set"))),
    }
}

/// Read and parse an optional env var, warning (and ignoring it) when the
/// value doesn't parse.
fn optional_parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = std::env::var(name).ok()?;
    if value.is_empty() {
        return None;
    }
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(var = name, value = %value, "ignoring unparseable environment variable");
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a config without going through env vars.
    pub(crate) fn test_config() -> BotConfig {
        BotConfig {
            bot_token: "test-token".to_string(),
            openai_api_key: "sk-test".to_string(),
            curateit_api_url: "https://api.curateit.test".to_string(),
            assistant_id: "asst_test".to_string(),
            collection_id: None,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            run_timeout: Duration::from_secs(DEFAULT_RUN_TIMEOUT_SECS),
        }
    }

    #[test]
    fn debug_redacts_secrets() {
        let debug = format!("{:?}", test_config());
        assert!(!debug.contains("test-token"));
        assert!(!debug.contains("sk-test"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("api.curateit.test"));
    }

    #[test]
    fn default_polling_parameters() {
        let cfg = test_config();
        assert_eq!(cfg.poll_interval, Duration::from_millis(500));
        assert_eq!(cfg.run_timeout, Duration::from_secs(120));
        assert!(cfg.collection_id.is_none());
    }
}
