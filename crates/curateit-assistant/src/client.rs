//! REST client for the Assistants v2 API (threads, messages, runs).

use reqwest::Client;
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::error::{AssistantError, AssistantResult};
use crate::types::{CreatedObject, MessageList, RunObject, RunStatus};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for the OpenAI Assistants API.
///
/// Every call carries the `OpenAI-Beta: assistants=v2` header the threads
/// and runs endpoints require.
pub struct AssistantClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl AssistantClient {
    /// Create a client against the public OpenAI endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Override the base URL (compatible gateways, test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Create a new conversation thread and return its id.
    pub async fn create_thread(&self) -> AssistantResult<String> {
        let created: CreatedObject = self
            .post_json(&format!("{}/threads", self.base_url), &serde_json::json!({}))
            .await?;
        debug!(thread_id = %created.id, "created thread");
        Ok(created.id)
    }

    /// Append a user message to a thread.
    pub async fn add_user_message(&self, thread_id: &str, text: &str) -> AssistantResult<()> {
        let _: CreatedObject = self
            .post_json(
                &format!("{}/threads/{thread_id}/messages", self.base_url),
                &serde_json::json!({
                    "role": "user",
                    "content": text,
                }),
            )
            .await?;
        Ok(())
    }

    /// Start a run on a thread with per-turn instructions; returns the run id.
    pub async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
        instructions: &str,
    ) -> AssistantResult<String> {
        let created: CreatedObject = self
            .post_json(
                &format!("{}/threads/{thread_id}/runs", self.base_url),
                &serde_json::json!({
                    "assistant_id": assistant_id,
                    "instructions": instructions,
                }),
            )
            .await?;
        debug!(%thread_id, run_id = %created.id, "created run");
        Ok(created.id)
    }

    /// Fetch the current status of a run.
    pub async fn run_status(&self, thread_id: &str, run_id: &str) -> AssistantResult<RunStatus> {
        let run: RunObject = self
            .get_json(&format!(
                "{}/threads/{thread_id}/runs/{run_id}",
                self.base_url
            ))
            .await?;
        Ok(run.status)
    }

    /// The text of the newest assistant reply in a thread, if any.
    pub async fn latest_assistant_reply(&self, thread_id: &str) -> AssistantResult<Option<String>> {
        let list: MessageList = self
            .get_json(&format!("{}/threads/{thread_id}/messages", self.base_url))
            .await?;
        Ok(list.latest_assistant_reply())
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> AssistantResult<T> {
        let response = self
            .http
            .post(url)
            .header("Authorization", self.auth_header()?)
            .header("OpenAI-Beta", "assistants=v2")
            .json(body)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> AssistantResult<T> {
        let response = self
            .http
            .get(url)
            .header("Authorization", self.auth_header()?)
            .header("OpenAI-Beta", "assistants=v2")
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> AssistantResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "assistant API error");
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json()
            .await
            .map_err(|e| AssistantError::InvalidResponse(e.to_string()))
    }

    fn auth_header(&self) -> AssistantResult<HeaderValue> {
        let mut value = HeaderValue::try_from(format!("Bearer {}", self.api_key))
            .map_err(|e| AssistantError::InvalidApiKey(e.to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for AssistantClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
