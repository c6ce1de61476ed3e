//! Extraction errors

use thiserror::Error;

/// Errors that can occur during model extraction
#[derive(Debug, Error)]
pub enum InferenceError {
    /// No API key configured
    #[error("Extraction not configured: {0}")]
    NotConfigured(String),

    /// Failed to connect to the API
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the API failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during extraction
    #[error("Extraction timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            InferenceError::Timeout(30000)
        } else if err.is_connect() {
            InferenceError::ConnectionFailed(err.to_string())
        } else {
            InferenceError::RequestFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            InferenceError::Timeout(30000).to_string(),
            "Extraction timeout after 30000ms"
        );
        assert_eq!(
            InferenceError::RateLimited.to_string(),
            "Rate limit exceeded"
        );
        assert!(
            InferenceError::NotConfigured("missing api key".to_string())
                .to_string()
                .contains("missing api key")
        );
    }
}
