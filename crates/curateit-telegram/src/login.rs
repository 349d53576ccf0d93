//! The multi-step login dialogue, per chat.
//!
//! `/login` puts a chat into the flow; the next message is taken verbatim
//! as the email (no format validation), the one after as the password. The
//! entry is removed as soon as the password arrives — one authentication
//! attempt per `/login`, whatever its outcome. While a chat is in the
//! flow, all other message handling for that chat is suppressed.

use std::collections::HashMap;
use std::sync::Arc;

use teloxide::types::ChatId;
use tokio::sync::RwLock;

/// Where a chat currently is in the login dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LoginState {
    /// Waiting for the email message.
    AwaitingEmail,
    /// Waiting for the password message.
    AwaitingPassword {
        /// Email captured in the previous step.
        email: String,
    },
}

/// What the caller must do after feeding a message into the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    /// Email stored; prompt the user for their password.
    PromptPassword,
    /// Both pieces collected; perform the authentication attempt.
    /// The flow entry is already removed.
    Attempt {
        /// Email from the first step.
        email: String,
        /// Password from the second step.
        password: String,
    },
}

/// Per-chat login state machine.
#[derive(Clone, Default)]
pub struct LoginFlow {
    inner: Arc<RwLock<HashMap<ChatId, LoginState>>>,
}

impl LoginFlow {
    /// Create an empty flow map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the login dialogue for a chat.
    pub async fn begin(&self, chat_id: ChatId) {
        self.inner
            .write()
            .await
            .insert(chat_id, LoginState::AwaitingEmail);
    }

    /// Whether a chat is mid-login.
    pub async fn is_active(&self, chat_id: ChatId) -> bool {
        self.inner.read().await.contains_key(&chat_id)
    }

    /// Feed a message into the flow and advance the state machine.
    ///
    /// Returns `None` when the chat is not in the flow. On
    /// [`LoginStep::Attempt`] the entry has been removed atomically, so a
    /// racing duplicate message cannot trigger a second attempt.
    pub async fn advance(&self, chat_id: ChatId, text: &str) -> Option<LoginStep> {
        let mut guard = self.inner.write().await;
        match guard.remove(&chat_id)? {
            LoginState::AwaitingEmail => {
                guard.insert(
                    chat_id,
                    LoginState::AwaitingPassword {
                        email: text.to_string(),
                    },
                );
                Some(LoginStep::PromptPassword)
            },
            LoginState::AwaitingPassword { email } => Some(LoginStep::Attempt {
                email,
                password: text.to_string(),
            }),
        }
    }
}
