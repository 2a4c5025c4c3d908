//! SMTP mailer implementation

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message as LettreMessage, Tokio1Executor,
};

use crate::domain::communication::mailer::{Mailer, MailerError, Message, MessageId};

/// SMTP configuration
#[derive(Clone, Debug, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[clap(long = "smtp-host", env = "SMTP_HOST", default_value = "localhost")]
    pub host: String,

    /// The SMTP port
    #[clap(id = "smtp_port", long = "smtp-port", env = "SMTP_PORT", default_value = "587")]
    pub port: u16,

    /// The SMTP username
    #[clap(long = "smtp-user", env = "SMTP_USER")]
    pub username: Option<String>,

    /// The SMTP password
    #[clap(long = "smtp-password", env = "SMTP_PASSWORD")]
    pub password: Option<String>,

    /// Verify the TLS certificate
    #[clap(long = "smtp-verify-tls", env = "SMTP_VERIFY_TLS", default_value_t = true, action = clap::ArgAction::Set)]
    pub verify_tls: bool,

    /// Enable STARTTLS (TLS upgrade on connection) instead of implicit TLS
    #[clap(long = "smtp-starttls", env = "SMTP_STARTTLS", default_value_t = true, action = clap::ArgAction::Set)]
    pub starttls: bool,
}

impl Default for SMTPConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            username: None,
            password: None,
            verify_tls: true,
            starttls: true,
        }
    }
}

impl SMTPConfig {
    /// Whether both a username and a password were supplied
    pub fn has_credentials(&self) -> bool {
        self.credentials().is_some()
    }

    fn credentials(&self) -> Option<Credentials> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Credentials::new(username.to_string(), password.to_string()))
            }
            _ => None,
        }
    }
}

/// SMTP mailer
#[derive(Clone)]
pub struct SMTPMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl std::fmt::Debug for SMTPMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SMTPMailer").finish_non_exhaustive()
    }
}

impl SMTPMailer {
    /// Create a new SMTP mailer. No connection is made until the first send.
    pub fn new(config: &SMTPConfig) -> Result<Self> {
        let tls_parameters = TlsParameters::builder(config.host.clone())
            .dangerous_accept_invalid_certs(!config.verify_tls)
            .build()?;

        let tls = if config.starttls {
            Tls::Required(tls_parameters)
        } else {
            Tls::Wrapper(tls_parameters)
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .tls(tls);

        if let Some(credentials) = config.credentials() {
            builder = builder.credentials(credentials);
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

fn compose(message: &Message) -> Result<LettreMessage, MailerError> {
    let from: Mailbox = message
        .from
        .parse()
        .map_err(|_| MailerError::InvalidEmail)?;

    let to: Mailbox = message
        .to
        .as_str()
        .parse()
        .map_err(|_| MailerError::InvalidEmail)?;

    LettreMessage::builder()
        .from(from)
        .to(to)
        .subject(message.subject.clone())
        .multipart(MultiPart::alternative_plain_html(
            message.plain_body.clone(),
            message.html_body.clone(),
        ))
        .map_err(|e| MailerError::UnknownError(e.into()))
}

#[async_trait]
impl Mailer for SMTPMailer {
    async fn send_email(&self, message: &Message) -> Result<MessageId, MailerError> {
        let email = compose(message)?;

        let response = self
            .transport
            .send(email)
            .await
            .map_err(|e| MailerError::UnknownError(e.into()))?;

        Ok(MessageId::new(response.first_line().unwrap_or_default()))
    }
}
