//! Application state shared across handlers

use std::sync::Arc;

use application::{ForwardService, ports::MailerPort};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Forward-package derivation service
    pub forward_service: Arc<ForwardService>,
    /// Outbound mail relay
    pub mailer: Arc<dyn MailerPort>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
