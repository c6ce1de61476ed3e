//! Application configuration

use application::FallbackStyle;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Model extraction configuration
    #[serde(default)]
    pub extraction: ExtractionAppConfig,

    /// Mailgun configuration (optional; sends are skipped without it)
    #[serde(default)]
    pub mailgun: MailgunConfig,

    /// Forward-package derivation configuration
    #[serde(default)]
    pub forwarding: ForwardingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins (empty = allow all in dev)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Graceful shutdown timeout in seconds
    #[serde(default)]
    pub shutdown_timeout_secs: Option<u64>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: Some(30),
        }
    }
}

/// Model extraction configuration, with the credential behind SecretString
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionAppConfig {
    /// Base URL of the completions API
    #[serde(default = "default_extraction_base_url")]
    pub base_url: String,

    /// API key (sensitive); extraction is skipped when absent
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Model to use
    #[serde(default = "default_extraction_model")]
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_extraction_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_extraction_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_extraction_model() -> String {
    "gpt-5-mini".to_string()
}

const fn default_extraction_timeout_ms() -> u64 {
    30000
}

impl Default for ExtractionAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_extraction_base_url(),
            api_key: None,
            model: default_extraction_model(),
            timeout_ms: default_extraction_timeout_ms(),
        }
    }
}

impl ExtractionAppConfig {
    /// Whether an API key is present
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Build the ai_core engine configuration
    #[must_use]
    pub fn to_engine_config(&self) -> ai_core::ExtractionConfig {
        ai_core::ExtractionConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .as_ref()
                .map(|k| k.expose_secret().to_string()),
            model: self.model.clone(),
            timeout_ms: self.timeout_ms,
            ..Default::default()
        }
    }
}

/// Mailgun configuration, with secrets behind SecretString
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MailgunConfig {
    /// API key (sensitive)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Sending domain
    #[serde(default)]
    pub domain: Option<String>,

    /// Webhook signing key for inbound route verification (sensitive)
    #[serde(default, skip_serializing)]
    pub webhook_signing_key: Option<SecretString>,

    /// Whether inbound deliveries must carry a valid signature
    #[serde(default)]
    pub signature_required: bool,
}

impl MailgunConfig {
    /// Whether credentials are present and sends can be attempted
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.domain.as_ref().is_some_and(|d| !d.is_empty())
    }

    /// Get the signing key for webhook verification
    #[must_use]
    pub fn signing_key_str(&self) -> Option<&str> {
        self.webhook_signing_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
    }

    /// Build the Mailgun client configuration
    ///
    /// Returns `None` when credentials are missing.
    #[must_use]
    pub fn to_client_config(&self) -> Option<integration_mailgun::MailgunClientConfig> {
        let api_key = self.api_key.as_ref()?.expose_secret().to_string();
        let domain = self.domain.clone()?;
        if domain.is_empty() {
            return None;
        }
        Some(integration_mailgun::MailgunClientConfig {
            api_key,
            domain,
            ..Default::default()
        })
    }
}

/// Forward-package derivation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForwardingConfig {
    /// Verbosity of the heuristic fallback summary
    #[serde(default)]
    pub fallback_style: FallbackStyle,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., MAILSIFT_SERVER_PORT)
            .add_source(
                config::Environment::with_prefix("MAILSIFT")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
