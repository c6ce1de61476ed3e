//! Mailgun inbound route webhook types
//!
//! Mailgun forwards inbound email as a form POST with the parsed message
//! fields plus a timestamp/token/signature triple. The signature is an
//! HMAC-SHA256 of `timestamp + token` keyed with the route's webhook
//! signing key.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Inbound email fields posted by a Mailgun route
///
/// The signature triple is kept as flat fields: form deserializers do not
/// reliably support `#[serde(flatten)]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundEmail {
    /// Envelope sender
    #[serde(default)]
    pub sender: Option<String>,
    /// Message subject
    #[serde(default)]
    pub subject: Option<String>,
    /// Plain-text body
    #[serde(default, rename = "body-plain")]
    pub body_plain: Option<String>,
    /// Unix timestamp of the delivery
    #[serde(default)]
    pub timestamp: Option<String>,
    /// One-time token
    #[serde(default)]
    pub token: Option<String>,
    /// Hex HMAC-SHA256 of timestamp + token
    #[serde(default)]
    pub signature: Option<String>,
}

impl InboundEmail {
    /// The signature triple of this delivery
    #[must_use]
    pub fn webhook_signature(&self) -> WebhookSignature {
        WebhookSignature {
            timestamp: self.timestamp.clone(),
            token: self.token.clone(),
            signature: self.signature.clone(),
        }
    }
}

/// Signature fields attached to signed webhook deliveries
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookSignature {
    /// Unix timestamp of the delivery
    #[serde(default)]
    pub timestamp: Option<String>,
    /// One-time token
    #[serde(default)]
    pub token: Option<String>,
    /// Hex HMAC-SHA256 of timestamp + token
    #[serde(default)]
    pub signature: Option<String>,
}

impl WebhookSignature {
    /// Verify this signature against a signing key
    ///
    /// Missing fields fail verification.
    #[must_use]
    pub fn verify(&self, signing_key: &str) -> bool {
        match (&self.timestamp, &self.token, &self.signature) {
            (Some(timestamp), Some(token), Some(signature)) => {
                verify_signature(timestamp, token, signature, signing_key)
            }
            _ => {
                warn!("Webhook signature fields missing");
                false
            }
        }
    }
}

/// Verify a Mailgun webhook signature
#[must_use]
pub fn verify_signature(timestamp: &str, token: &str, signature: &str, signing_key: &str) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(signing_key.as_bytes()) else {
        warn!("Failed to create HMAC");
        return false;
    };

    mac.update(timestamp.as_bytes());
    mac.update(token.as_bytes());

    let Ok(expected) = hex::decode(signature) else {
        warn!("Failed to decode signature hex");
        return false;
    };

    mac.verify_slice(&expected).is_ok()
}
