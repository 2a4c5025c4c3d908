//! Resend HTTP API mailer

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::communication::mailer::{Mailer, MailerError, Message, MessageId};

/// Resend API mailer
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

impl ResendMailer {
    /// Create a new Resend mailer.
    ///
    /// `timeout` bounds each HTTP request made by the underlying client.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_email(&self, message: &Message) -> Result<MessageId, MailerError> {
        let body = SendEmailRequest {
            from: &message.from,
            to: [message.to.as_str()],
            subject: &message.subject,
            html: &message.html_body,
            text: &message.plain_body,
        };

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("request to Resend failed")?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(MailerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let SendEmailResponse { id } = response
            .json()
            .await
            .context("could not decode Resend response")?;

        debug!(message_id = %id, "Resend accepted email");

        Ok(MessageId::new(id))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    use crate::domain::communication::email_addresses::EmailAddress;

    use super::*;

    fn message() -> TestResult<Message> {
        Ok(Message {
            from: "Storefront <orders@example.com>".to_string(),
            to: EmailAddress::new("u@example.com")?,
            subject: "We received your order".to_string(),
            html_body: "<p>o1</p>".to_string(),
            plain_body: "o1".to_string(),
        })
    }

    #[tokio::test]
    async fn test_send_email_success() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/emails"))
            .and(matchers::header("Authorization", "Bearer re_test"))
            .and(matchers::body_json(json!({
                "from": "Storefront <orders@example.com>",
                "to": ["u@example.com"],
                "subject": "We received your order",
                "html": "<p>o1</p>",
                "text": "o1",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "msg_123" })))
            .expect(1)
            .mount(&server)
            .await;

        let mailer = ResendMailer::new(&server.uri(), "re_test", Duration::from_secs(5))?;

        let id = mailer.send_email(&message()?).await?;

        assert_eq!(id, MessageId::new("msg_123"));

        Ok(())
    }

    #[tokio::test]
    async fn test_send_email_rejected() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let mailer = ResendMailer::new(&server.uri(), "re_test", Duration::from_secs(5))?;

        let result = mailer.send_email(&message()?).await;

        assert!(matches!(
            result,
            Err(MailerError::Rejected { status: 429, ref body }) if body == "rate limited"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_send_email_malformed_response() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let mailer = ResendMailer::new(&server.uri(), "re_test", Duration::from_secs(5))?;

        let result = mailer.send_email(&message()?).await;

        assert!(matches!(result, Err(MailerError::UnknownError(_))));

        Ok(())
    }

    #[test]
    fn test_trailing_slash_is_trimmed() -> TestResult {
        let mailer = ResendMailer::new("https://api.resend.com/", "re_test", Duration::from_secs(5))?;

        assert_eq!(mailer.base_url, "https://api.resend.com");

        Ok(())
    }
}
