//! Gemini-backed brain implementation.
//!
//! This crate provides a [`Brain`] that sends prompts to the Gemini
//! `generateContent` REST endpoint. It is the production text-completion
//! service behind query classification and answer synthesis.
//!
//! # Features
//!
//! - Low-temperature, bounded-length generation (0.1 / 1024 tokens by default)
//! - Conversation history sent as alternating `user` / `model` turns
//! - HTTP failures mapped onto [`BrainError`] categories (503, 429, 401, 400)
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use gemini_brain::{Brain, GeminiBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = GeminiBrain::from_env()?;
//!     let text = brain.complete("How many feet are in a mile?", &[]).await?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::GeminiBrain;
pub use config::{GeminiBrainConfig, GeminiBrainConfigBuilder};

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, HistoryMessage};
