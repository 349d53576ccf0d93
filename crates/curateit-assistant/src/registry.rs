//! Lazy per-chat thread registry: platform key `K` → backend thread id.
//!
//! `K` is the platform-specific chat identifier — for Telegram an `i64`
//! newtype. A thread is created on first use and reused for every later
//! turn in that chat, which is what gives the assistant memory. Entries
//! never expire; growth is bounded by the number of distinct chats seen
//! during the process lifetime.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::client::AssistantClient;
use crate::error::AssistantResult;

/// Maps platform chat keys to conversation thread ids.
///
/// Generic over `K` — any `Eq + Hash + Clone + Send + Sync + 'static` type.
#[derive(Clone)]
pub struct ThreadRegistry<K: Eq + Hash + Clone + Send + Sync + 'static> {
    inner: Arc<Mutex<HashMap<K, String>>>,
}

impl<K: Eq + Hash + Clone + Send + Sync + 'static> Default for ThreadRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone + Send + Sync + 'static> ThreadRegistry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get the thread id for a key, creating one via `client` if absent.
    pub async fn get_or_create(
        &self,
        key: K,
        client: &AssistantClient,
    ) -> AssistantResult<String> {
        self.get_or_create_with(key, || client.create_thread()).await
    }

    /// Get the thread id for a key, creating one with `create` if absent.
    ///
    /// The map lock is held across the create call, so exactly one thread
    /// is ever created per key even when messages race.
    pub async fn get_or_create_with<F, Fut>(&self, key: K, create: F) -> AssistantResult<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AssistantResult<String>>,
    {
        let mut guard = self.inner.lock().await;
        if let Some(id) = guard.get(&key) {
            return Ok(id.clone());
        }
        let id = create().await?;
        guard.insert(key, id.clone());
        Ok(id)
    }

    /// The thread id for a key, if one exists.
    pub async fn get(&self, key: &K) -> Option<String> {
        self.inner.lock().await.get(key).cloned()
    }

    /// Number of known threads.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Whether the registry is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}
