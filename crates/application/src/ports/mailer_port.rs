//! Mailer port - Interface for the outbound mail relay

use async_trait::async_trait;

use crate::error::ApplicationError;

/// An outbound summary email, ready to hand to the relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Recipient address (the original sender)
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub text: String,
    /// Optional calendar invite, attached as `event.ics`
    pub ics: Option<String>,
}

/// Port for sending the forwarded summary email
///
/// Sends are fire-and-forget from the pipeline's perspective: failures are
/// logged by the caller and never fed back into package derivation.
#[async_trait]
pub trait MailerPort: Send + Sync {
    /// Send one email
    async fn send(&self, email: &OutboundEmail) -> Result<(), ApplicationError>;

    /// Whether credentials are present and sends will be attempted
    fn is_configured(&self) -> bool;
}
