//! The Brain trait definition.

use async_trait::async_trait;

use crate::error::BrainError;
use crate::history::HistoryMessage;

/// A text-completion backend.
///
/// Given a prompt and the recent conversation, a brain returns natural
/// language text or fails with a [`BrainError`]. The trait is object-safe
/// and is normally held as `Arc<dyn Brain>`.
#[async_trait]
pub trait Brain: Send + Sync {
    /// Complete a prompt with optional conversation context.
    ///
    /// # Arguments
    ///
    /// * `prompt` - The full prompt text for this turn.
    /// * `history` - Prior exchanges, oldest first. May be empty.
    async fn complete(&self, prompt: &str, history: &[HistoryMessage])
        -> Result<String, BrainError>;

    /// Get a human-readable name for this brain implementation.
    fn name(&self) -> &str;

    /// Check if the brain is ready to accept prompts.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}
