//! Extractor port - Interface for model-backed package extraction

use async_trait::async_trait;

use crate::error::ApplicationError;

/// Result of one extraction attempt
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// Raw response content (expected to be a JSON object, but not trusted)
    pub content: String,
    /// Model used for the extraction
    pub model: String,
    /// Latency in milliseconds
    pub latency_ms: u64,
}

/// Port for language-model extraction
///
/// Implementations must convert every transport-level problem (network,
/// timeout, HTTP status) into an `Err`; the synthesizer pattern-matches
/// the result into its fallback path and never lets a failure escape.
#[async_trait]
pub trait ExtractorPort: Send + Sync {
    /// Run one extraction with a system instruction and a user message
    async fn extract(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<ExtractionOutcome, ApplicationError>;

    /// Check if the extraction backend is reachable
    async fn is_healthy(&self) -> bool;

    /// Get the name of the configured model
    fn model_name(&self) -> String;
}
