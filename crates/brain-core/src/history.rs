//! Conversation history management.
//!
//! The assistant keeps a single rolling window of recent exchanges for the
//! lifetime of a session. Each completed query appends one user/assistant
//! pair; the oldest pairs are dropped once the window is full.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Default number of exchanges (user + assistant pairs) to keep.
pub const DEFAULT_MAX_TURNS: usize = 5;

/// Who authored a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single message in the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: Role,
    pub content: String,
}

impl HistoryMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Bounded conversation history for one session.
///
/// # Example
///
/// ```rust
/// use brain_core::ConversationHistory;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let history = ConversationHistory::new(5); // Keep 5 exchanges
///
///     history.add_exchange("5 miles to km", "5 miles is 8.05 km.").await;
///     history.add_exchange("and 10?", "10 miles is 16.09 km.").await;
///
///     let messages = history.get().await;
///     assert_eq!(messages.len(), 4); // 2 exchanges = 4 messages
/// }
/// ```
#[derive(Debug)]
pub struct ConversationHistory {
    messages: RwLock<Vec<HistoryMessage>>,
    /// Maximum number of exchanges (user + assistant pairs) to keep.
    max_turns: usize,
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}

impl ConversationHistory {
    /// Create an empty history that keeps at most `max_turns` exchanges.
    pub fn new(max_turns: usize) -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
            max_turns,
        }
    }

    /// Snapshot of the history, oldest first.
    pub async fn get(&self) -> Vec<HistoryMessage> {
        self.messages.read().await.clone()
    }

    /// Append a user message and assistant response, trimming old exchanges.
    pub async fn add_exchange(&self, user_msg: &str, assistant_msg: &str) {
        let mut messages = self.messages.write().await;

        messages.push(HistoryMessage::user(user_msg));
        messages.push(HistoryMessage::assistant(assistant_msg));

        // Each turn is 2 messages
        let max_messages = self.max_turns * 2;
        if messages.len() > max_messages {
            let to_remove = messages.len() - max_messages;
            messages.drain(0..to_remove);
        }
    }

    /// Number of stored messages (not exchanges).
    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    /// Whether no exchange has been recorded yet.
    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }

    /// Drop every stored exchange.
    pub async fn clear(&self) {
        self.messages.write().await.clear();
    }

    /// The configured exchange limit.
    pub fn max_turns(&self) -> usize {
        self.max_turns
    }
}
