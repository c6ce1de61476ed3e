//! Inbound email webhook handler
//!
//! Receives inbound email forwarded by a Mailgun route, derives the
//! forward package, and relays the reformatted summary back to the
//! original sender. The webhook always answers: every derivation failure
//! degrades inside the pipeline, and relay failures are logged without
//! feeding back into the response.

use axum::{
    Json,
    extract::{Form, State},
    http::StatusCode,
    response::IntoResponse,
};
use domain::EmailAddress;
use integration_mailgun::InboundEmail;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use application::{
    ports::OutboundEmail,
    services::{calendar_invite::build_ics_from_details, detect_primary_link, format_forward_email},
};

use crate::state::AppState;

/// Response for a processed inbound email
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    /// Processing status
    pub status: &'static str,
    /// Subject of the summary email
    pub forward_subject: String,
    /// Whether a calendar invite was attached
    pub has_calendar_event: bool,
}

/// `POST /email/webhook` - process one inbound email
#[instrument(skip(state, form))]
pub async fn handle_incoming_email(
    State(state): State<AppState>,
    Form(form): Form<InboundEmail>,
) -> impl IntoResponse {
    let mailgun = &state.config.mailgun;

    // Verify the delivery signature when required or when a key is present
    if mailgun.signature_required || mailgun.signing_key_str().is_some() {
        let Some(signing_key) = mailgun.signing_key_str() else {
            warn!("Webhook signature required but signing key not configured");
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({"error": "webhook signing key not configured"})),
            )
                .into_response();
        };

        if !form.webhook_signature().verify(signing_key) {
            warn!("Webhook signature verification failed");
            return (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"error": "invalid signature"})),
            )
                .into_response();
        }
    }

    let sender = form.sender.unwrap_or_default();
    let subject = form
        .subject
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "(no subject)".to_string());
    let body = form.body_plain.unwrap_or_default();

    info!(
        sender = %sender,
        subject = %subject,
        body_len = body.len(),
        "Inbound email received"
    );

    let package = state.forward_service.build_forward_package(&subject, &body).await;

    let ics = if package.has_calendar_event {
        build_ics_from_details(&package.calendar_event)
    } else {
        None
    };
    let has_calendar_event = ics.is_some();

    let primary_link = detect_primary_link(&body);
    let forward_text = format_forward_email(&package, primary_link.as_deref());
    let forward_subject = package.forward_subject.clone();

    // Relay the summary back to the sender, fire-and-forget
    match EmailAddress::new(&sender) {
        Ok(recipient) => {
            let mailer = state.mailer.clone();
            let email = OutboundEmail {
                to: recipient.to_string(),
                subject: forward_subject.clone(),
                text: forward_text,
                ics,
            };
            tokio::spawn(async move {
                if let Err(e) = mailer.send(&email).await {
                    error!(error = %e, to = %email.to, "Failed to send forward email");
                } else {
                    info!(to = %email.to, "Forward email handed to relay");
                }
            });
        }
        Err(e) => {
            warn!(error = %e, sender = %sender, "Invalid sender address, skipping reply");
        }
    }

    (
        StatusCode::OK,
        Json(serde_json::json!(WebhookResponse {
            status: "ok",
            forward_subject,
            has_calendar_event,
        })),
    )
        .into_response()
}
