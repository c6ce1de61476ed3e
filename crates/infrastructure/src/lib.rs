//! Infrastructure layer
//!
//! Application configuration and the adapters that plug the ai_core and
//! Mailgun clients into the application ports.

pub mod adapters;
pub mod config;

pub use adapters::{MailgunMailerAdapter, OpenAiExtractorAdapter};
pub use config::{AppConfig, ExtractionAppConfig, ForwardingConfig, MailgunConfig, ServerConfig};
