//! Failing brain - every call errors.

use async_trait::async_trait;
use brain_core::{Brain, BrainError, HistoryMessage};

/// Which error category a [`FailingBrain`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureKind {
    #[default]
    Unavailable,
    RateLimited,
    Unauthorized,
    BadRequest,
    Network,
}

/// A brain that fails every call.
///
/// Used for offline runs, where classification and synthesis must take
/// their deterministic fallback paths.
#[derive(Debug, Clone, Default)]
pub struct FailingBrain {
    kind: FailureKind,
    reason: String,
}

impl FailingBrain {
    /// Create a brain that fails with `kind` and the given reason.
    pub fn new(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    /// Shorthand for an always-unavailable brain.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(FailureKind::Unavailable, reason)
    }

    fn error(&self) -> BrainError {
        let reason = self.reason.clone();
        match self.kind {
            FailureKind::Unavailable => BrainError::Unavailable(reason),
            FailureKind::RateLimited => BrainError::RateLimited(reason),
            FailureKind::Unauthorized => BrainError::Unauthorized(reason),
            FailureKind::BadRequest => BrainError::BadRequest(reason),
            FailureKind::Network => BrainError::Network(reason),
        }
    }
}

#[async_trait]
impl Brain for FailingBrain {
    async fn complete(
        &self,
        _prompt: &str,
        _history: &[HistoryMessage],
    ) -> Result<String, BrainError> {
        Err(self.error())
    }

    fn name(&self) -> &str {
        "FailingBrain"
    }

    async fn is_ready(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_fails() {
        let brain = FailingBrain::unavailable("offline");

        let err = brain.complete("hello", &[]).await.unwrap_err();
        assert!(matches!(err, BrainError::Unavailable(ref r) if r == "offline"));
        assert!(!brain.is_ready().await);
    }

    #[tokio::test]
    async fn test_kind_selects_category() {
        let brain = FailingBrain::new(FailureKind::Unauthorized, "bad key");

        let err = brain.complete("hello", &[]).await.unwrap_err();
        assert!(matches!(err, BrainError::Unauthorized(_)));
    }
}
