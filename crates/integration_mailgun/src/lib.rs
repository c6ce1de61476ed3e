//! Mailgun integration
//!
//! Client for the Mailgun messages API (outbound summary emails with an
//! optional calendar attachment) and types for the inbound route webhook,
//! including signature verification.

pub mod client;
pub mod webhook;

pub use client::{MailgunClient, MailgunClientConfig, MailgunError};
pub use webhook::{InboundEmail, WebhookSignature, verify_signature};
