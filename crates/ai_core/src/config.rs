//! Configuration for the extraction engine

use serde::{Deserialize, Serialize};

/// Configuration for the OpenAI-compatible extraction engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Base URL of the completions API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; extraction is skipped entirely when absent
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for sampling (low, for structured output)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-5-mini".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

const fn default_max_tokens() -> u32 {
    1024
}

const fn default_temperature() -> f32 {
    0.2
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl ExtractionConfig {
    /// Whether a credential is present and extraction can be attempted
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Create a config with the given API key and defaults otherwise
    #[must_use]
    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = ExtractionConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-5-mini");
        assert_eq!(config.timeout_ms, 30000);
        assert_eq!(config.max_tokens, 1024);
        assert!((config.temperature - 0.2).abs() < 0.01);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn default_config_is_not_configured() {
        assert!(!ExtractionConfig::default().is_configured());
    }

    #[test]
    fn blank_api_key_is_not_configured() {
        let config = ExtractionConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn with_api_key_is_configured() {
        let config = ExtractionConfig::with_api_key("sk-test");
        assert!(config.is_configured());
        assert_eq!(config.model, "gpt-5-mini");
    }

    #[test]
    fn deserialization_with_defaults() {
        let config: ExtractionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.timeout_ms, 30000);
    }

    #[test]
    fn api_key_is_not_serialized() {
        let config = ExtractionConfig::with_api_key("sk-secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
    }
}
