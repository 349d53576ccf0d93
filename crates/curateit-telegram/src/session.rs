//! Per-chat session state: credentials and the turn-in-progress guard.
//!
//! Credentials are keyed by `ChatId` — two users logging in from different
//! chats never see each other's account. The busy guard serializes
//! free-form turns within one chat while leaving distinct chats fully
//! concurrent.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use curateit_api::AuthSession;
use teloxide::types::ChatId;
use tokio::sync::RwLock;

/// Interior state guarded by a single `RwLock`.
struct Inner {
    credentials: HashMap<ChatId, AuthSession>,
    /// Chats with an assistant turn currently in flight.
    busy: HashSet<ChatId>,
}

/// Chat-scoped credential store plus per-chat turn guard.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Inner>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                credentials: HashMap::new(),
                busy: HashSet::new(),
            })),
        }
    }

    /// Store the credential for a chat, replacing any previous one.
    pub async fn set_credential(&self, chat_id: ChatId, session: AuthSession) {
        self.inner.write().await.credentials.insert(chat_id, session);
    }

    /// The credential for a chat, if one is set.
    pub async fn credential(&self, chat_id: ChatId) -> Option<AuthSession> {
        self.inner.read().await.credentials.get(&chat_id).cloned()
    }

    /// Remove the credential for a chat, returning it if present.
    pub async fn clear_credential(&self, chat_id: ChatId) -> Option<AuthSession> {
        self.inner.write().await.credentials.remove(&chat_id)
    }

    /// Atomically mark a chat as busy.
    ///
    /// Returns `true` if the caller now owns the turn; `false` if a turn
    /// is already in flight for this chat.
    pub async fn try_start_turn(&self, chat_id: ChatId) -> bool {
        self.inner.write().await.busy.insert(chat_id)
    }

    /// Mark a chat's turn as finished.
    pub async fn finish_turn(&self, chat_id: ChatId) {
        self.inner.write().await.busy.remove(&chat_id);
    }

    /// Whether a turn is in flight for a chat.
    pub async fn is_busy(&self, chat_id: ChatId) -> bool {
        self.inner.read().await.busy.contains(&chat_id)
    }
}
