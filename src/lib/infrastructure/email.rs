//! Email delivery providers and their configuration

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use clap::{Parser, ValueEnum};

use crate::domain::{
    communication::mailer::{Mailer, MailerError, Message, MessageId},
    orders::notifications::DeliverySettings,
};

pub mod resend;
pub mod smtp;

use resend::ResendMailer;
use smtp::{SMTPConfig, SMTPMailer};

/// Which delivery provider to use
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EmailProvider {
    /// Resend HTTP API
    Resend,

    /// Plain SMTP relay
    Smtp,
}

/// Email configuration
#[derive(Clone, Debug, Parser)]
pub struct EmailConfig {
    /// The delivery provider
    #[clap(long = "email-provider", env = "EMAIL_PROVIDER", value_enum, default_value = "resend")]
    pub provider: EmailProvider,

    /// The sender mailbox
    #[clap(long = "email-from", env = "EMAIL_FROM", default_value = "Storefront <orders@example.com>")]
    pub sender: String,

    /// The Resend API key; sends are skipped when absent
    #[clap(long = "resend-api-key", env = "RESEND_API_KEY")]
    pub api_key: Option<String>,

    /// The Resend API base URL
    #[clap(long = "resend-base-url", env = "RESEND_BASE_URL", default_value = "https://api.resend.com")]
    pub api_base_url: String,

    /// Linear backoff step between delivery attempts, in milliseconds
    #[clap(long = "email-retry-backoff-ms", env = "EMAIL_RETRY_BACKOFF_MS", default_value = "250")]
    pub retry_backoff_ms: u64,

    /// Timeout for a single delivery attempt, in seconds (0 disables it)
    #[clap(long = "email-attempt-timeout-secs", env = "EMAIL_ATTEMPT_TIMEOUT_SECS", default_value = "10")]
    pub attempt_timeout_secs: u64,

    /// SMTP settings, used when the provider is `smtp`
    #[clap(flatten)]
    pub smtp: SMTPConfig,
}

impl EmailConfig {
    /// Whether the selected provider has credentials
    pub fn provider_configured(&self) -> bool {
        match self.provider {
            EmailProvider::Resend => self.api_key.as_deref().is_some_and(|key| !key.is_empty()),
            EmailProvider::Smtp => self.smtp.has_credentials(),
        }
    }

    fn attempt_timeout(&self) -> Option<Duration> {
        (self.attempt_timeout_secs > 0).then(|| Duration::from_secs(self.attempt_timeout_secs))
    }

    /// Settings for the transactional email service
    pub fn delivery_settings(&self) -> DeliverySettings {
        let settings = DeliverySettings::new(self.sender.clone())
            .with_retry_backoff(Duration::from_millis(self.retry_backoff_ms))
            .with_attempt_timeout(self.attempt_timeout());

        if self.provider_configured() {
            settings
        } else {
            settings.unconfigured()
        }
    }
}

/// The configured delivery provider
#[derive(Clone, Debug)]
pub enum ProviderMailer {
    /// Resend HTTP API
    Resend(ResendMailer),

    /// SMTP relay
    Smtp(SMTPMailer),
}

impl ProviderMailer {
    /// Builds the mailer selected by `config`
    pub fn from_config(config: &EmailConfig) -> Result<Self> {
        let mailer = match config.provider {
            EmailProvider::Resend => Self::Resend(ResendMailer::new(
                &config.api_base_url,
                config.api_key.as_deref().unwrap_or_default(),
                config.attempt_timeout().unwrap_or(Duration::from_secs(30)),
            )?),
            EmailProvider::Smtp => Self::Smtp(SMTPMailer::new(&config.smtp)?),
        };

        Ok(mailer)
    }
}

#[async_trait]
impl Mailer for ProviderMailer {
    async fn send_email(&self, message: &Message) -> Result<MessageId, MailerError> {
        match self {
            Self::Resend(mailer) => mailer.send_email(message).await,
            Self::Smtp(mailer) => mailer.send_email(message).await,
        }
    }
}
