//! Error types for orchestrator operations.

use brain_core::BrainError;
use thiserror::Error;

/// Errors that can occur while answering a query.
///
/// None of these escape [`Orchestrator::process`](crate::Orchestrator::process);
/// they are logged and folded into a failed
/// [`ProcessResult`](crate::ProcessResult).
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Brain processing failed.
    #[error("brain error: {0}")]
    Brain(#[from] BrainError),

    /// The classifier response could not be used.
    #[error("invalid analysis: {0}")]
    InvalidAnalysis(String),

    /// No tool is registered for a domain the query needs.
    #[error("tool execution failed: {0}")]
    ToolFailed(String),

    /// The synthesis response could not be used.
    #[error("synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Construction from the environment failed.
    #[error("configuration error: {0}")]
    Config(String),
}
