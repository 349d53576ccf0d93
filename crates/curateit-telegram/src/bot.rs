//! Teloxide bot setup, dispatcher, and handler registration.

use std::sync::Arc;

use curateit_api::CurateItClient;
use curateit_assistant::{AssistantClient, RunConfig, RunOrchestrator};
use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::BotConfig;
use crate::handler::{self, BotState};
use crate::login::LoginFlow;
use crate::session::SessionStore;

/// Build `BotState` and the teloxide handler tree from a config.
fn build_state_and_handler(
    config: BotConfig,
) -> (
    BotState,
    Bot,
    teloxide::dispatching::UpdateHandler<anyhow::Error>,
) {
    let bot = Bot::new(&config.bot_token);

    let api = Arc::new(CurateItClient::new(config.curateit_api_url.clone()));
    let assistant = Arc::new(AssistantClient::new(config.openai_api_key.clone()));
    let orchestrator = RunOrchestrator::new(assistant, config.assistant_id.clone()).with_config(
        RunConfig {
            poll_interval: config.poll_interval,
            timeout: config.run_timeout,
        },
    );

    let state = BotState {
        api,
        orchestrator,
        sessions: SessionStore::new(),
        logins: LoginFlow::new(),
        config: Arc::new(config),
        cancel: CancellationToken::new(),
    };

    let message_handler = Update::filter_message().endpoint({
        let state = state.clone();
        move |bot: Bot, msg: Message| {
            let state = state.clone();
            async move { Box::pin(handler::handle_message(bot, msg, state)).await }
        }
    });

    let handler = dptree::entry().branch(message_handler);

    (state, bot, handler)
}

/// Run the Telegram bot until shutdown.
///
/// Installs a Ctrl+C handler; on shutdown the cancellation token fires so
/// any in-flight run polling unwinds instead of looping on.
pub async fn run(config: BotConfig) -> anyhow::Result<()> {
    info!(api = %config.curateit_api_url, "Starting Telegram bot...");

    let (state, bot, handler) = build_state_and_handler(config);

    Box::pin(
        Dispatcher::builder(bot, handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch(),
    )
    .await;

    state.cancel.cancel();
    info!("Bot stopped");
    Ok(())
}
