//! Extractor adapter over the ai_core engine

use std::time::Instant;

use ai_core::{ExtractionEngine, ExtractionRequest, OpenAiExtractionEngine};
use application::{ApplicationError, ExtractionOutcome, ExtractorPort};
use async_trait::async_trait;

use crate::config::ExtractionAppConfig;

/// Adapter exposing the OpenAI engine through the application port
#[derive(Debug)]
pub struct OpenAiExtractorAdapter {
    engine: OpenAiExtractionEngine,
}

impl OpenAiExtractorAdapter {
    /// Create the adapter from app configuration
    ///
    /// # Errors
    ///
    /// Returns an error when no credential is configured or the engine
    /// cannot be initialized.
    pub fn new(config: &ExtractionAppConfig) -> Result<Self, ApplicationError> {
        let engine = OpenAiExtractionEngine::new(config.to_engine_config())
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { engine })
    }
}

#[async_trait]
impl ExtractorPort for OpenAiExtractorAdapter {
    async fn extract(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<ExtractionOutcome, ApplicationError> {
        let started = Instant::now();

        let response = self
            .engine
            .extract(ExtractionRequest::new(system_prompt, user_message))
            .await
            .map_err(|e| ApplicationError::Extraction(e.to_string()))?;

        Ok(ExtractionOutcome {
            content: response.content,
            model: response.model,
            latency_ms: started.elapsed().as_millis().try_into().unwrap_or(u64::MAX),
        })
    }

    async fn is_healthy(&self) -> bool {
        self.engine.health_check().await.unwrap_or(false)
    }

    fn model_name(&self) -> String {
        self.engine.default_model().to_string()
    }
}
