//! Error types for brain operations.

use thiserror::Error;

/// Errors that can occur while talking to an LLM backend.
///
/// HTTP failures are categorised by status so callers can tell a transient
/// outage from a configuration problem.
#[derive(Debug, Error)]
pub enum BrainError {
    /// The service is temporarily unavailable (HTTP 503).
    #[error("brain unavailable: {0}")]
    Unavailable(String),

    /// Too many requests (HTTP 429).
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Credentials were rejected (HTTP 401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The request was malformed (HTTP 400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request never reached the service.
    #[error("network error: {0}")]
    Network(String),

    /// Any other failure, including unparseable responses.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// The brain is misconfigured (missing key, bad URL).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl BrainError {
    /// Map an HTTP status code and message to an error category.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            503 => Self::Unavailable(message),
            429 => Self::RateLimited(message),
            401 => Self::Unauthorized(message),
            400 => Self::BadRequest(message),
            _ => Self::ProcessingFailed(format!("HTTP {}: {}", status, message)),
        }
    }

    /// Whether retrying the same request later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::RateLimited(_) | Self::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_categories() {
        assert!(matches!(BrainError::from_status(503, "x"), BrainError::Unavailable(_)));
        assert!(matches!(BrainError::from_status(429, "x"), BrainError::RateLimited(_)));
        assert!(matches!(BrainError::from_status(401, "x"), BrainError::Unauthorized(_)));
        assert!(matches!(BrainError::from_status(400, "x"), BrainError::BadRequest(_)));
        assert!(matches!(
            BrainError::from_status(500, "x"),
            BrainError::ProcessingFailed(_)
        ));
    }

    #[test]
    fn test_generic_status_keeps_code() {
        let err = BrainError::from_status(502, "bad gateway");
        assert_eq!(err.to_string(), "processing failed: HTTP 502: bad gateway");
    }

    #[test]
    fn test_transient() {
        assert!(BrainError::Unavailable("down".into()).is_transient());
        assert!(BrainError::RateLimited("slow down".into()).is_transient());
        assert!(!BrainError::Unauthorized("nope".into()).is_transient());
    }
}
