//! Mailer adapter over the Mailgun client

use application::{ApplicationError, MailerPort, OutboundEmail};
use async_trait::async_trait;
use integration_mailgun::MailgunClient;
use tracing::info;

use crate::config::MailgunConfig;

/// Adapter exposing the Mailgun client through the application port
///
/// Constructs without credentials too; `send` then logs the skip and
/// reports success.
#[derive(Debug)]
pub struct MailgunMailerAdapter {
    client: Option<MailgunClient>,
}

impl MailgunMailerAdapter {
    /// Create the adapter from app configuration
    ///
    /// # Errors
    ///
    /// Returns an error when credentials are present but the client
    /// cannot be initialized.
    pub fn new(config: &MailgunConfig) -> Result<Self, ApplicationError> {
        let client = match config.to_client_config() {
            Some(client_config) => Some(
                MailgunClient::new(client_config)
                    .map_err(|e| ApplicationError::Configuration(e.to_string()))?,
            ),
            None => None,
        };
        Ok(Self { client })
    }
}

#[async_trait]
impl MailerPort for MailgunMailerAdapter {
    async fn send(&self, email: &OutboundEmail) -> Result<(), ApplicationError> {
        let Some(client) = &self.client else {
            info!(to = %email.to, "Mailgun credentials missing, skipping send");
            return Ok(());
        };

        client
            .send_message(&email.to, &email.subject, &email.text, email.ics.as_deref())
            .await
            .map_err(|e| ApplicationError::ExternalService(e.to_string()))?;

        Ok(())
    }

    fn is_configured(&self) -> bool {
        self.client.is_some()
    }
}
