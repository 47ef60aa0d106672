//! Query router for the conversion assistant.
//!
//! This crate provides the [`Orchestrator`] type, which answers a free-text
//! query with the tools from `conversion-tools` and a [`Brain`] for the
//! language parts.
//!
//! # Architecture
//!
//! ```text
//! query
//!   ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ORCHESTRATOR                           │
//! │                                                             │
//! │  1. Classify (brain → JSON flags, else keyword sets)        │
//! │         ↓                                                   │
//! │  2. For each needed domain, in order unit/currency/date:    │
//! │     extract intent from the full query → calculate          │
//! │         ↓                                                   │
//! │  3. Synthesize (brain → prose, else formatted lines)        │
//! │         ↓                                                   │
//! │  4. Append the exchange to session history on success       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use orchestrator::{Orchestrator, SessionContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Orchestrator::from_env(SessionContext::new())?;
//!
//!     let result = orchestrator.process("Convert 5 miles to km").await;
//!     println!("{}", result.final_response);
//!     Ok(())
//! }
//! ```
//!
//! [`Brain`]: brain_core::Brain

mod analysis;
mod error;
mod orchestrator;
mod prompts;
mod result;
mod router;
mod session;
mod synthesis;

pub use analysis::{classify_by_keywords, AnalysisSource, QueryAnalysis};
pub use error::OrchestratorError;
pub use orchestrator::{
    Orchestrator, INTERNAL_ERROR_RESPONSE, PARSE_FAILURE_ERROR, PARSE_FAILURE_RESPONSE,
};
pub use prompts::{
    load_classifier_prompt, load_synthesis_prompt, DEFAULT_CLASSIFIER_PROMPT,
    DEFAULT_CLASSIFIER_PROMPT_FILE, DEFAULT_SYNTHESIS_PROMPT, DEFAULT_SYNTHESIS_PROMPT_FILE,
};
pub use result::{ProcessResult, ToolOutcome};
pub use router::Router;
pub use session::SessionContext;
pub use synthesis::{fallback_response, Synthesizer};

// Re-export commonly used types from dependencies
pub use brain_core::{Brain, BrainError, ConversationHistory};
pub use conversion_tools::{ConversionResult, Domain, RateCache, RateSource};
