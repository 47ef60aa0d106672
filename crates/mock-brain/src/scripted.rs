//! Scripted brain - replays canned responses in order.

use std::collections::VecDeque;

use async_trait::async_trait;
use brain_core::{Brain, BrainError, HistoryMessage};
use tokio::sync::Mutex;

/// A brain that answers each call with the next queued response.
///
/// Once the queue is exhausted every further call fails with
/// [`BrainError::Unavailable`]. Every prompt and the history length seen
/// with it are recorded for assertions.
#[derive(Debug, Default)]
pub struct ScriptedBrain {
    responses: Mutex<VecDeque<Result<String, BrainError>>>,
    calls: Mutex<Vec<(String, usize)>>,
}

impl ScriptedBrain {
    /// Create a brain that replies with `responses`, in order.
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(|r| Ok(r.into())).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue another successful response.
    pub async fn push_response(&self, response: impl Into<String>) {
        self.responses.lock().await.push_back(Ok(response.into()));
    }

    /// Queue a failure.
    pub async fn push_error(&self, error: BrainError) {
        self.responses.lock().await.push_back(Err(error));
    }

    /// Prompts received so far, oldest first.
    pub async fn prompts(&self) -> Vec<String> {
        self.calls.lock().await.iter().map(|(p, _)| p.clone()).collect()
    }

    /// Number of history messages passed with each call.
    pub async fn history_lengths(&self) -> Vec<usize> {
        self.calls.lock().await.iter().map(|(_, n)| *n).collect()
    }

    /// Number of calls received.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl Brain for ScriptedBrain {
    async fn complete(
        &self,
        prompt: &str,
        history: &[HistoryMessage],
    ) -> Result<String, BrainError> {
        self.calls
            .lock()
            .await
            .push((prompt.to_string(), history.len()));

        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(BrainError::Unavailable("script exhausted".to_string())))
    }

    fn name(&self) -> &str {
        "ScriptedBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order() {
        let brain = ScriptedBrain::new(["one", "two"]);

        assert_eq!(brain.complete("p1", &[]).await.unwrap(), "one");
        assert_eq!(brain.complete("p2", &[]).await.unwrap(), "two");
        assert_eq!(brain.call_count().await, 2);
    }

    #[tokio::test]
    async fn test_exhausted_script_is_unavailable() {
        let brain = ScriptedBrain::default();

        let err = brain.complete("anything", &[]).await.unwrap_err();
        assert!(matches!(err, BrainError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_queued_error() {
        let brain = ScriptedBrain::default();
        brain
            .push_error(BrainError::RateLimited("slow down".into()))
            .await;
        brain.push_response("recovered").await;

        assert!(matches!(
            brain.complete("a", &[]).await,
            Err(BrainError::RateLimited(_))
        ));
        assert_eq!(brain.complete("b", &[]).await.unwrap(), "recovered");
    }

    #[tokio::test]
    async fn test_records_history_length() {
        let brain = ScriptedBrain::new(["ok"]);
        let history = vec![HistoryMessage::user("q"), HistoryMessage::assistant("a")];

        brain.complete("next", &history).await.unwrap();

        assert_eq!(brain.prompts().await, vec!["next"]);
        assert_eq!(brain.history_lengths().await, vec![2]);
    }
}
