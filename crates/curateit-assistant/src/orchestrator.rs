//! Drives one assistant turn: message in, run started, status polled to
//! completion, newest reply out.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::AssistantClient;
use crate::error::{AssistantError, AssistantResult};
use crate::registry::ThreadRegistry;
use crate::types::RunStatus;

/// Reply used when the backend produced no assistant message or an empty
/// text payload.
pub const FALLBACK_REPLY: &str = "Try Again";

/// Polling parameters for run completion.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Delay between status checks.
    pub poll_interval: Duration,
    /// Maximum wall-clock wait for a run to reach a terminal state.
    pub timeout: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Orchestrates assistant turns for a set of chats.
///
/// Holds the client, the per-chat thread registry, and the static
/// pre-provisioned assistant identity.
#[derive(Clone)]
pub struct RunOrchestrator<K: Eq + Hash + Clone + Send + Sync + 'static> {
    client: Arc<AssistantClient>,
    registry: ThreadRegistry<K>,
    assistant_id: String,
    config: RunConfig,
}

impl<K: Eq + Hash + Clone + Send + Sync + 'static> RunOrchestrator<K> {
    /// Create an orchestrator for the given assistant id.
    pub fn new(client: Arc<AssistantClient>, assistant_id: impl Into<String>) -> Self {
        Self {
            client,
            registry: ThreadRegistry::new(),
            assistant_id: assistant_id.into(),
            config: RunConfig::default(),
        }
    }

    /// Override the polling parameters.
    #[must_use]
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Run one conversation turn for `key` and return the reply text.
    ///
    /// The chat's thread is created lazily on first use and reused after,
    /// so the assistant sees the full history of the chat. Polling stops
    /// on completion, on a failed/cancelled/expired run, on timeout, or
    /// when `cancel` fires.
    pub async fn respond(
        &self,
        key: K,
        text: &str,
        instructions: &str,
        cancel: &CancellationToken,
    ) -> AssistantResult<String> {
        let thread_id = self.registry.get_or_create(key, &self.client).await?;

        self.client.add_user_message(&thread_id, text).await?;
        let run_id = self
            .client
            .create_run(&thread_id, &self.assistant_id, instructions)
            .await?;

        poll_run(
            || self.client.run_status(&thread_id, &run_id),
            &self.config,
            cancel,
        )
        .await?;

        let reply = self.client.latest_assistant_reply(&thread_id).await?;
        match reply {
            Some(text) if !text.is_empty() => Ok(text),
            _ => {
                warn!(%thread_id, "no assistant reply found after completed run");
                Ok(FALLBACK_REPLY.to_string())
            },
        }
    }
}

impl<K: Eq + Hash + Clone + Send + Sync + 'static> std::fmt::Debug for RunOrchestrator<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunOrchestrator")
            .field("assistant_id", &self.assistant_id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Poll `fetch_status` until the run completes.
///
/// `Completed` breaks the loop; `Failed`/`Cancelled`/`Expired` map to
/// [`AssistantError::RunFailed`]; exceeding the configured timeout maps to
/// [`AssistantError::RunTimedOut`]; a fired `cancel` token maps to
/// [`AssistantError::Cancelled`].
async fn poll_run<F, Fut>(
    mut fetch_status: F,
    config: &RunConfig,
    cancel: &CancellationToken,
) -> AssistantResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AssistantResult<RunStatus>>,
{
    let poll = async {
        loop {
            let status = fetch_status().await?;
            debug!(?status, "run status");
            match status {
                RunStatus::Completed => return Ok(()),
                s if s.is_terminal() => return Err(AssistantError::RunFailed { status: s }),
                _ => {},
            }
            tokio::time::sleep(config.poll_interval).await;
        }
    };

    tokio::select! {
        () = cancel.cancelled() => Err(AssistantError::Cancelled),
        result = tokio::time::timeout(config.timeout, poll) => match result {
            Ok(outcome) => outcome,
            Err(_) => Err(AssistantError::RunTimedOut {
                waited_secs: config.timeout.as_secs(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn config(interval_ms: u64, timeout_secs: u64) -> RunConfig {
        RunConfig {
            poll_interval: Duration::from_millis(interval_ms),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Yields each status in sequence, then repeats the last one.
    fn status_sequence(
        statuses: &'static [RunStatus],
    ) -> impl FnMut() -> std::future::Ready<AssistantResult<RunStatus>> {
        let calls = AtomicUsize::new(0);
        move || {
            let i = calls.fetch_add(1, Ordering::SeqCst);
            let status = statuses
                .get(i)
                .or(statuses.last())
                .copied()
                .unwrap_or(RunStatus::Unknown);
            std::future::ready(Ok(status))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn completes_after_queued_and_in_progress() {
        let fetch = status_sequence(&[
            RunStatus::Queued,
            RunStatus::InProgress,
            RunStatus::Completed,
        ]);
        let result = poll_run(fetch, &config(500, 120), &CancellationToken::new()).await;
        assert!(result.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_run_maps_to_run_failed() {
        let fetch = status_sequence(&[RunStatus::Queued, RunStatus::Failed]);
        let result = poll_run(fetch, &config(500, 120), &CancellationToken::new()).await;
        assert!(matches!(
            result,
            Err(AssistantError::RunFailed {
                status: RunStatus::Failed
            })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_run_maps_to_run_failed() {
        let fetch = status_sequence(&[RunStatus::Expired]);
        let result = poll_run(fetch, &config(500, 120), &CancellationToken::new()).await;
        assert!(matches!(result, Err(AssistantError::RunFailed { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn never_completing_run_times_out() {
        let fetch = status_sequence(&[RunStatus::InProgress]);
        let result = poll_run(fetch, &config(500, 2), &CancellationToken::new()).await;
        assert!(matches!(
            result,
            Err(AssistantError::RunTimedOut { waited_secs: 2 })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn pre_cancelled_token_aborts_immediately() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let fetch = status_sequence(&[RunStatus::InProgress]);
        let result = poll_run(fetch, &config(500, 120), &cancel).await;
        assert!(matches!(result, Err(AssistantError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_during_wait_aborts() {
        let cancel = CancellationToken::new();
        let child = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            child.cancel();
        });
        let fetch = status_sequence(&[RunStatus::InProgress]);
        let result = poll_run(fetch, &config(500, 120), &cancel).await;
        assert!(matches!(result, Err(AssistantError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn transport_error_propagates() {
        let fetch = || {
            std::future::ready(Err(AssistantError::InvalidResponse(
                "garbled".to_string(),
            )))
        };
        let result = poll_run(fetch, &config(500, 120), &CancellationToken::new()).await;
        assert!(matches!(result, Err(AssistantError::InvalidResponse(_))));
    }
}
