//! Port definitions for the extraction engine

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// Request for one extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// System instruction contract
    pub system_prompt: String,
    /// User message (subject + cleaned body)
    pub user_message: String,
    /// Model to use (overrides config default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ExtractionRequest {
    /// Create a request with system and user messages
    pub fn new(system_prompt: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_message: user_message.into(),
            model: None,
        }
    }

    /// Set the model for this request
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Response from one extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResponse {
    /// Generated content, expected to be a JSON object
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics, when reported
    pub usage: Option<TokenUsage>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Port for extraction engine implementations
#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    /// Run one extraction
    async fn extract(
        &self,
        request: ExtractionRequest,
    ) -> Result<ExtractionResponse, InferenceError>;

    /// Check if the API is reachable with the configured credential
    async fn health_check(&self) -> Result<bool, InferenceError>;

    /// Get the configured model
    fn default_model(&self) -> &str;
}
