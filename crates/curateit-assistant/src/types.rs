//! Wire types for the Assistants v2 API.

use serde::Deserialize;

/// Lifecycle status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Waiting to be picked up.
    Queued,
    /// Being processed.
    InProgress,
    /// Waiting on tool output (not used by this bot, still reported).
    RequiresAction,
    /// Cancellation requested but not yet complete.
    Cancelling,
    /// Finished successfully — the only state that yields a reply.
    Completed,
    /// Finished with an error.
    Failed,
    /// Cancelled before completion.
    Cancelled,
    /// Exceeded the backend's own expiry window.
    Expired,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Whether the run has stopped progressing.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Failed | Self::Cancelled | Self::Expired
        )
    }
}

/// Minimal created-object response (`{ "id": ... }`), shared by thread,
/// message, and run creation.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedObject {
    pub id: String,
}

/// `GET /threads/{t}/runs/{r}` response.
#[derive(Debug, Deserialize)]
pub(crate) struct RunObject {
    pub status: RunStatus,
}

/// `GET /threads/{t}/messages` response. Messages are listed newest first.
#[derive(Debug, Deserialize)]
pub(crate) struct MessageList {
    pub data: Vec<ThreadMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ThreadMessage {
    pub role: String,
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageContent {
    #[serde(default)]
    pub text: Option<MessageText>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageText {
    pub value: String,
}

impl MessageList {
    /// The text of the newest assistant-authored message, if any.
    ///
    /// Content is an array of parts; only the first text part is used.
    pub(crate) fn latest_assistant_reply(&self) -> Option<String> {
        self.data
            .iter()
            .find(|m| m.role == "assistant")
            .and_then(|m| m.content.first())
            .and_then(|c| c.text.as_ref())
            .map(|t| t.value.clone())
    }
}
