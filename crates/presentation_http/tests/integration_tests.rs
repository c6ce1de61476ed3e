//! Router-level integration tests
//!
//! Exercise the webhook end to end on the heuristic path, with a
//! recording mailer standing in for the Mailgun relay.

use std::sync::Arc;

use application::{
    ApplicationError, FallbackStyle, ForwardService,
    ports::{MailerPort, OutboundEmail},
};
use axum::http::StatusCode;
use axum_test::TestServer;
use infrastructure::AppConfig;
use presentation_http::{AppState, create_router};
use secrecy::SecretString;
use tokio::sync::Mutex;

/// Mailer that records outbound emails instead of sending them
#[derive(Debug, Default)]
struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

#[async_trait::async_trait]
impl MailerPort for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), ApplicationError> {
        self.sent.lock().await.push(email.clone());
        Ok(())
    }

    fn is_configured(&self) -> bool {
        true
    }
}

fn test_server(config: AppConfig) -> (TestServer, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState {
        forward_service: Arc::new(ForwardService::heuristic_only(FallbackStyle::Brief)),
        mailer: mailer.clone(),
        config: Arc::new(config),
    };
    let server = TestServer::new(create_router(state)).expect("test server");
    (server, mailer)
}

async fn recorded(mailer: &RecordingMailer) -> Vec<OutboundEmail> {
    // The relay send is spawned fire-and-forget; give it a beat to land
    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        let sent = mailer.sent.lock().await;
        if !sent.is_empty() {
            return sent.clone();
        }
    }
    mailer.sent.lock().await.clone()
}

#[tokio::test]
async fn root_reports_running() {
    let (server, _) = test_server(AppConfig::default());

    let response = server.get("/").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Email assistant is running!");
}

#[tokio::test]
async fn health_reports_configuration() {
    let (server, _) = test_server(AppConfig::default());

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["extractor_configured"], false);
    assert_eq!(body["mailer_configured"], true);
}

#[tokio::test]
async fn webhook_builds_package_and_relays_summary() {
    let (server, mailer) = test_server(AppConfig::default());

    let response = server
        .post("/email/webhook")
        .form(&[
            ("sender", "guest@example.com"),
            ("subject", "Team sync"),
            (
                "body-plain",
                "Meeting tomorrow at 3pm in Room 210. Please RSVP at https://example.com/rsvp",
            ),
        ])
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["forward_subject"], "Team sync – Key Info");
    assert_eq!(body["has_calendar_event"], true);

    let sent = recorded(&mailer).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "guest@example.com");
    assert_eq!(sent[0].subject, "Team sync – Key Info");
    assert!(sent[0].text.contains("Quick link: https://example.com/rsvp"));
    assert!(sent[0].ics.as_deref().is_some_and(|ics| ics.contains("BEGIN:VEVENT")));
}

#[tokio::test]
async fn webhook_without_dates_sends_plain_summary() {
    let (server, mailer) = test_server(AppConfig::default());

    let response = server
        .post("/email/webhook")
        .form(&[
            ("sender", "guest@example.com"),
            ("subject", "Thanks"),
            ("body-plain", "Thanks for your help!"),
        ])
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["has_calendar_event"], false);

    let sent = recorded(&mailer).await;
    assert_eq!(sent.len(), 1);
    assert!(sent[0].ics.is_none());
    assert!(sent[0].text.contains("Thanks for your help!"));
}

#[tokio::test]
async fn webhook_defaults_missing_subject() {
    let (server, _) = test_server(AppConfig::default());

    let response = server
        .post("/email/webhook")
        .form(&[("sender", "guest@example.com"), ("body-plain", "hello")])
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["forward_subject"], "(no subject) – Key Info");
}

#[tokio::test]
async fn webhook_with_invalid_sender_still_answers() {
    let (server, mailer) = test_server(AppConfig::default());

    let response = server
        .post("/email/webhook")
        .form(&[("subject", "No sender"), ("body-plain", "some text")])
        .await;

    response.assert_status_ok();

    // No recipient, nothing relayed
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(mailer.sent.lock().await.is_empty());
}

#[tokio::test]
async fn webhook_rejects_missing_signature_when_required() {
    let mut config = AppConfig::default();
    config.mailgun.signature_required = true;
    config.mailgun.webhook_signing_key = Some(SecretString::from("whk-test"));
    let (server, _) = test_server(config);

    let response = server
        .post("/email/webhook")
        .form(&[("sender", "guest@example.com"), ("body-plain", "hi")])
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn webhook_unavailable_when_key_missing_but_required() {
    let mut config = AppConfig::default();
    config.mailgun.signature_required = true;
    let (server, _) = test_server(config);

    let response = server
        .post("/email/webhook")
        .form(&[("sender", "guest@example.com"), ("body-plain", "hi")])
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}
