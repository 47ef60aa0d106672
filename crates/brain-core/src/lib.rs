//! Core trait and types for the LLM boundary.
//!
//! The conversion assistant treats the language model as an external
//! text-completion service. This crate defines that seam:
//!
//! - [`Brain`] - The trait every LLM backend implements
//! - [`BrainError`] - Transport errors, categorised by HTTP status
//! - [`ConversationHistory`] - Bounded history passed as context to each call
//! - [`hash_prompt`] - Stable fingerprints for prompt versions
//!
//! # Example
//!
//! ```rust
//! use brain_core::{Brain, BrainError, HistoryMessage};
//! use async_trait::async_trait;
//!
//! struct ShoutBrain;
//!
//! #[async_trait]
//! impl Brain for ShoutBrain {
//!     async fn complete(
//!         &self,
//!         prompt: &str,
//!         _history: &[HistoryMessage],
//!     ) -> Result<String, BrainError> {
//!         Ok(prompt.to_uppercase())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "ShoutBrain"
//!     }
//! }
//! ```

mod error;
mod history;
mod prompt;
mod trait_def;

pub use error::BrainError;
pub use history::{ConversationHistory, HistoryMessage, Role, DEFAULT_MAX_TURNS};
pub use prompt::hash_prompt;
pub use trait_def::Brain;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
