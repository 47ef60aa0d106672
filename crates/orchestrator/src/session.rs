//! Per-session mutable state.

use std::sync::Arc;

use brain_core::{ConversationHistory, DEFAULT_MAX_TURNS};
use conversion_tools::RateCache;

/// State shared by every query in one session: the bounded conversation
/// history and the exchange-rate cache.
///
/// Created by the caller and handed to the orchestrator; nothing outlives
/// the session.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub history: Arc<ConversationHistory>,
    pub rate_cache: Arc<RateCache>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    /// A fresh session keeping the last [`DEFAULT_MAX_TURNS`] exchanges.
    pub fn new() -> Self {
        Self::with_parts(
            ConversationHistory::new(DEFAULT_MAX_TURNS),
            RateCache::new(),
        )
    }

    /// A session built from existing parts.
    pub fn with_parts(history: ConversationHistory, rate_cache: RateCache) -> Self {
        Self {
            history: Arc::new(history),
            rate_cache: Arc::new(rate_cache),
        }
    }
}
