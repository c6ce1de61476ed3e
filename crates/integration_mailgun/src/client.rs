//! Mailgun client for sending messages
//!
//! Uses the Mailgun v3 messages API with basic auth and a multipart form,
//! so calendar invites can ride along as an attachment.

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, instrument};

/// Mailgun API errors
#[derive(Debug, thiserror::Error)]
pub enum MailgunError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Missing configuration: {0}")]
    Configuration(String),

    #[error("Missing recipient address")]
    MissingRecipient,
}

/// Mailgun client configuration
#[derive(Debug, Clone)]
pub struct MailgunClientConfig {
    /// API key ("api" basic-auth password)
    pub api_key: String,
    /// Sending domain (e.g. `mg.example.com`)
    pub domain: String,
    /// API base URL (default: <https://api.mailgun.net/v3>)
    pub base_url: String,
    /// Display name used in the From header
    pub sender_name: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for MailgunClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            domain: String::new(),
            base_url: "https://api.mailgun.net/v3".to_string(),
            sender_name: "Mailsift Assistant".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Mailgun messages API client
#[derive(Debug, Clone)]
pub struct MailgunClient {
    client: Client,
    config: MailgunClientConfig,
}

/// API response for a sent message
#[derive(Debug, Deserialize)]
pub struct SendMessageResponse {
    pub id: Option<String>,
    pub message: Option<String>,
}

impl MailgunClient {
    /// Create a new Mailgun client
    ///
    /// # Errors
    ///
    /// Returns an error when the API key or domain is missing, or the
    /// HTTP client cannot be initialized.
    pub fn new(config: MailgunClientConfig) -> Result<Self, MailgunError> {
        if config.api_key.is_empty() {
            return Err(MailgunError::Configuration(
                "api_key is required".to_string(),
            ));
        }
        if config.domain.is_empty() {
            return Err(MailgunError::Configuration(
                "domain is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// The From header for outbound messages
    fn from_header(&self) -> String {
        format!(
            "{} <assistant@{}>",
            self.config.sender_name, self.config.domain
        )
    }

    /// The messages endpoint for the configured domain
    fn messages_url(&self) -> String {
        format!(
            "{}/{}/messages",
            self.config.base_url.trim_end_matches('/'),
            self.config.domain
        )
    }

    /// Send a plain-text message, optionally attaching a calendar invite
    ///
    /// The invite is attached as `event.ics` with the `text/calendar`
    /// content type.
    #[instrument(skip(self, text, ics), fields(to = %to, has_ics = ics.is_some()))]
    pub async fn send_message(
        &self,
        to: &str,
        subject: &str,
        text: &str,
        ics: Option<&str>,
    ) -> Result<SendMessageResponse, MailgunError> {
        if to.is_empty() {
            return Err(MailgunError::MissingRecipient);
        }

        let subject = if subject.is_empty() { "Key Info" } else { subject };

        let mut form = Form::new()
            .text("from", self.from_header())
            .text("to", to.to_string())
            .text("subject", subject.to_string())
            .text("text", text.to_string());

        if let Some(ics) = ics {
            let part = Part::bytes(ics.as_bytes().to_vec())
                .file_name("event.ics")
                .mime_str("text/calendar")
                .map_err(MailgunError::Request)?;
            form = form.part("attachment", part);
        }

        debug!(subject = %subject, text_len = text.len(), "Sending message via Mailgun");

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth("api", Some(&self.config.api_key))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(MailgunError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Check if the Mailgun API accepts the configured credentials
    #[instrument(skip(self))]
    pub async fn is_available(&self) -> bool {
        self.client
            .get(format!(
                "{}/domains/{}",
                self.config.base_url.trim_end_matches('/'),
                self.config.domain
            ))
            .basic_auth("api", Some(&self.config.api_key))
            .send()
            .await
            .is_ok_and(|res| res.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: &str) -> MailgunClientConfig {
        MailgunClientConfig {
            api_key: "key-test".to_string(),
            domain: "mg.example.com".to_string(),
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn client_creation_requires_api_key() {
        let config = MailgunClientConfig {
            domain: "mg.example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            MailgunClient::new(config),
            Err(MailgunError::Configuration(_))
        ));
    }

    #[test]
    fn client_creation_requires_domain() {
        let config = MailgunClientConfig {
            api_key: "key".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            MailgunClient::new(config),
            Err(MailgunError::Configuration(_))
        ));
    }

    #[test]
    fn from_header_uses_domain() {
        let client = MailgunClient::new(test_config("https://api.mailgun.net/v3")).unwrap();
        assert_eq!(
            client.from_header(),
            "Mailsift Assistant <assistant@mg.example.com>"
        );
    }

    #[test]
    fn messages_url_includes_domain() {
        let client = MailgunClient::new(test_config("https://api.mailgun.net/v3/")).unwrap();
        assert_eq!(
            client.messages_url(),
            "https://api.mailgun.net/v3/mg.example.com/messages"
        );
    }

    #[tokio::test]
    async fn send_message_requires_recipient() {
        let client = MailgunClient::new(test_config("https://api.mailgun.net/v3")).unwrap();
        let result = client.send_message("", "subject", "text", None).await;
        assert!(matches!(result, Err(MailgunError::MissingRecipient)));
    }

    mod wiremock_tests {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        use super::*;

        #[tokio::test]
        async fn send_message_success() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/mg.example.com/messages"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "id": "<msg-id@mg.example.com>",
                    "message": "Queued. Thank you."
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let client = MailgunClient::new(test_config(&mock_server.uri())).unwrap();
            let response = client
                .send_message(
                    "sender@example.com",
                    "Party – Key Info",
                    "summary body",
                    Some("BEGIN:VCALENDAR\nEND:VCALENDAR\n"),
                )
                .await
                .expect("send succeeds");

            assert_eq!(response.message.as_deref(), Some("Queued. Thank you."));
        }

        #[tokio::test]
        async fn send_message_maps_api_errors() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/mg.example.com/messages"))
                .respond_with(ResponseTemplate::new(401).set_body_string("Forbidden"))
                .mount(&mock_server)
                .await;

            let client = MailgunClient::new(test_config(&mock_server.uri())).unwrap();
            let result = client
                .send_message("sender@example.com", "s", "t", None)
                .await;

            assert!(matches!(
                result,
                Err(MailgunError::Api { status: 401, .. })
            ));
        }

        #[tokio::test]
        async fn blank_subject_defaults_to_key_info() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/mg.example.com/messages"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
                .mount(&mock_server)
                .await;

            let client = MailgunClient::new(test_config(&mock_server.uri())).unwrap();
            let result = client.send_message("sender@example.com", "", "t", None).await;
            assert!(result.is_ok());
        }
    }
}
