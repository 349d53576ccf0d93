//! CurateIt Telegram Bot — binary entry point.
//!
//! Bridges Telegram, the CurateIt curation API, and the OpenAI Assistants
//! backend. Configuration comes from environment variables; see
//! [`curateit_telegram::config::BotConfig`].

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,curateit_telegram=info")),
        )
        .init();

    let config = curateit_telegram::config::BotConfig::load()?;
    Box::pin(curateit_telegram::bot::run(config)).await
}
