//! Deterministic brain implementations.
//!
//! - [`ScriptedBrain`] - Replies from a queue of canned responses and records prompts
//! - [`FailingBrain`] - Fails every call with a chosen error category
//!
//! The orchestrator tests drive classification and synthesis with these, and
//! the CLI uses [`FailingBrain`] in offline mode so that every LLM step falls
//! back to its local path.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{Brain, ScriptedBrain};
//!
//! #[tokio::main]
//! async fn main() {
//!     let brain = ScriptedBrain::new(["first", "second"]);
//!
//!     assert_eq!(brain.complete("a", &[]).await.unwrap(), "first");
//!     assert_eq!(brain.complete("b", &[]).await.unwrap(), "second");
//!     assert_eq!(brain.prompts().await, vec!["a", "b"]);
//! }
//! ```

mod failing;
mod scripted;

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, HistoryMessage};

pub use failing::{FailingBrain, FailureKind};
pub use scripted::ScriptedBrain;
