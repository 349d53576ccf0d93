//! Message routing: login flow, commands, link capture, assistant chat.
//!
//! Exactly one path handles each inbound message, in priority order: an
//! active login dialogue wins over everything, then `/`-commands, then a
//! bare URL, then free-form assistant chat.

use std::sync::Arc;

use curateit_api::{ApiError, CurateItClient};
use curateit_assistant::RunOrchestrator;
use teloxide::prelude::*;
use teloxide::types::ChatAction;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::BotConfig;
use crate::links;
use crate::login::{LoginFlow, LoginStep};
use crate::session::SessionStore;

/// Shared bot state passed to all handlers.
#[derive(Clone)]
pub struct BotState {
    /// Curation API client (credential-free; tokens come from `sessions`).
    pub api: Arc<CurateItClient>,
    /// Assistant turn orchestrator, keyed by chat.
    pub orchestrator: RunOrchestrator<ChatId>,
    /// Per-chat credentials and busy guard.
    pub sessions: SessionStore,
    /// Per-chat login dialogues.
    pub logins: LoginFlow,
    /// Loaded configuration.
    pub config: Arc<BotConfig>,
    /// Fired on shutdown to abort in-flight run polling.
    pub cancel: CancellationToken,
}

/// Command tokens the bot recognizes. Slash text that matches none of
/// these is ordinary chat input, not an error.
const COMMANDS: &[&str] = &["/start", "/login", "/search"];

/// Which handler path a message takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route<'a> {
    /// Chat is mid-login; the text is an email or password.
    LoginStep,
    /// A recognized `/`-command.
    Command,
    /// A bare URL to capture.
    Link(&'a str),
    /// Free-form assistant chat.
    Chat,
}

/// Classify a message. `login_active` suppresses every other path.
pub(crate) fn classify(text: &str, login_active: bool) -> Route<'_> {
    if login_active {
        Route::LoginStep
    } else if is_command(text) {
        Route::Command
    } else if let Some(link) = as_link(text) {
        Route::Link(link)
    } else {
        Route::Chat
    }
}

/// Whether the first token is a recognized command.
fn is_command(text: &str) -> bool {
    text.split_whitespace()
        .next()
        .is_some_and(|token| COMMANDS.contains(&token))
}

/// Treat a message as a link when it is a single `http(s)` token.
pub(crate) fn as_link(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if (trimmed.starts_with("http://") || trimmed.starts_with("https://"))
        && !trimmed.contains(char::is_whitespace)
    {
        Some(trimmed)
    } else {
        None
    }
}

/// Handle an incoming text message.
pub async fn handle_message(bot: Bot, msg: Message, state: BotState) -> anyhow::Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;

    match classify(text, state.logins.is_active(chat_id).await) {
        Route::LoginStep => handle_login_step(&bot, chat_id, &state, text).await,
        Route::Command => handle_command(&bot, chat_id, &state, text).await,
        Route::Link(link) => links::save_link(&bot, chat_id, &state, link).await,
        Route::Chat => handle_chat_turn(&bot, chat_id, &state, text).await,
    }
}

/// Handle bot commands.
async fn handle_command(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    text: &str,
) -> anyhow::Result<()> {
    let cmd = text.split_whitespace().next().unwrap_or("");

    match cmd {
        "/start" => {
            let _ = bot.send_message(chat_id, "Welcome To CurateitAI").await;
        },
        "/login" => {
            state.logins.begin(chat_id).await;
            let _ = bot.send_message(chat_id, "Please enter your email").await;
        },
        "/search" => {
            let query = text.strip_prefix("/search").unwrap_or("").trim();
            if query.is_empty() {
                let _ = bot.send_message(chat_id, "Usage: /search <query>").await;
            } else {
                links::search_gem(bot, chat_id, state, query).await?;
            }
        },
        // classify only routes recognized commands here.
        _ => {},
    }

    Ok(())
}

/// Advance the login dialogue with one message.
async fn handle_login_step(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    text: &str,
) -> anyhow::Result<()> {
    match state.logins.advance(chat_id, text).await {
        Some(LoginStep::PromptPassword) => {
            let _ = bot.send_message(chat_id, "Please enter your password").await;
        },
        Some(LoginStep::Attempt { email, password }) => {
            let result = state.api.login(&email, &password).await;
            let reply = apply_login_outcome(&state.sessions, chat_id, result).await;
            let _ = bot.send_message(chat_id, reply).await;
        },
        None => {},
    }

    Ok(())
}

/// Apply an authentication outcome to the session store and pick the
/// user-visible reply.
///
/// Only a successful login touches the store; a rejected or failed
/// attempt leaves any existing credential in place.
pub(crate) async fn apply_login_outcome(
    sessions: &SessionStore,
    chat_id: ChatId,
    result: Result<curateit_api::AuthSession, ApiError>,
) -> &'static str {
    match result {
        Ok(session) => {
            info!("chat {chat_id} logged in as {}", session.username);
            sessions.set_credential(chat_id, session).await;
            "Login Successful"
        },
        Err(ApiError::InvalidCredentials) => "Invalid credentials",
        Err(e) => {
            warn!(error = %e, "login attempt failed for chat {chat_id}");
            "Login failed. Please try again."
        },
    }
}

/// Run one assistant turn for a free-form message.
async fn handle_chat_turn(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    text: &str,
) -> anyhow::Result<()> {
    if !state.sessions.try_start_turn(chat_id).await {
        let _ = bot
            .send_message(chat_id, "Still working on your last message, give me a second.")
            .await;
        return Ok(());
    }

    let _ = bot.send_chat_action(chat_id, ChatAction::Typing).await;

    let username = state
        .sessions
        .credential(chat_id)
        .await
        .map(|c| c.username);
    let instructions = turn_instructions(username.as_deref());

    let reply = state
        .orchestrator
        .respond(chat_id, text, &instructions, &state.cancel)
        .await;
    state.sessions.finish_turn(chat_id).await;

    match reply {
        Ok(reply) => {
            let _ = bot.send_message(chat_id, reply).await;
        },
        Err(e) => {
            warn!(error = %e, "assistant turn failed for chat {chat_id}");
            let _ = bot
                .send_message(chat_id, "Something went wrong, please try again.")
                .await;
        },
    }

    Ok(())
}

/// Per-turn run instructions, personalized with the logged-in username.
pub(crate) fn turn_instructions(username: Option<&str>) -> String {
    match username {
        Some(name) => format!("Please address the user as {name}. The user has a premium account."),
        None => "The user has not logged in yet; address them neutrally.".to_string(),
    }
}
