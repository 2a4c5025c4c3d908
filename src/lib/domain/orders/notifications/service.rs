//! Transactional email service

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::{sleep, timeout};
use tracing::{error, info, warn};

#[cfg(test)]
use mockall::mock;

use crate::domain::{
    communication::{
        email_addresses::EmailAddress,
        mailer::{Mailer, MailerError, Message, MessageId},
    },
    orders::emails::{EmailKind, OrderEmail},
};

use super::{DeliverySettings, EmailMetrics, NotificationError, Outcome, MAX_SEND_ATTEMPTS};

/// Sends order lifecycle emails.
///
/// Every operation resolves to `Ok(())` once delivery succeeded, was
/// exhausted, or was skipped for lack of provider credentials. Only
/// rendering errors are returned.
#[async_trait]
pub trait TransactionalEmails: Clone + Send + Sync + 'static {
    /// Sends the template for `kind` to `email.to`.
    ///
    /// # Arguments
    /// * `kind` - The [`EmailKind`] to render.
    /// * `email` - The [`OrderEmail`] parameters.
    ///
    /// # Returns
    /// - [`Ok`] whatever the delivery outcome.
    /// - [`Err`] containing a [`NotificationError`] if the template could not be rendered.
    async fn send(&self, kind: EmailKind, email: &OrderEmail) -> Result<(), NotificationError>;

    /// Sends the "order created" email
    async fn send_order_created(&self, email: &OrderEmail) -> Result<(), NotificationError> {
        self.send(EmailKind::OrderCreated, email).await
    }

    /// Sends the "order paid" email
    async fn send_order_paid(&self, email: &OrderEmail) -> Result<(), NotificationError> {
        self.send(EmailKind::OrderPaid, email).await
    }

    /// Sends the "order cancelled" email
    async fn send_order_cancelled(&self, email: &OrderEmail) -> Result<(), NotificationError> {
        self.send(EmailKind::OrderCancelled, email).await
    }

    /// Sends the "order shipped" email
    async fn send_order_shipped(&self, email: &OrderEmail) -> Result<(), NotificationError> {
        self.send(EmailKind::OrderShipped, email).await
    }

    /// Sends the "order refunded" email
    async fn send_order_refunded(&self, email: &OrderEmail) -> Result<(), NotificationError> {
        self.send(EmailKind::OrderRefunded, email).await
    }
}

#[cfg(test)]
mock! {
    pub TransactionalEmails {}

    impl Clone for TransactionalEmails {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl TransactionalEmails for TransactionalEmails {
        async fn send(&self, kind: EmailKind, email: &OrderEmail) -> Result<(), NotificationError>;
    }
}

/// The result of one delivery attempt, emitted as a log event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendAttempt {
    /// Template kind being sent
    pub kind: EmailKind,

    /// Recipient
    pub to: EmailAddress,

    /// 1-based attempt number
    pub attempt_number: u32,

    /// [`Outcome::Success`] or [`Outcome::Failure`], never [`Outcome::Skipped`]
    /// since skipped sends make no attempts
    pub outcome: Outcome,

    /// Provider message id on success
    pub message_id: Option<MessageId>,

    /// Provider error on failure
    pub error: Option<String>,
}

impl SendAttempt {
    fn succeeded(kind: EmailKind, to: &EmailAddress, attempt_number: u32, id: MessageId) -> Self {
        Self {
            kind,
            to: to.clone(),
            attempt_number,
            outcome: Outcome::Success,
            message_id: Some(id),
            error: None,
        }
    }

    fn failed(kind: EmailKind, to: &EmailAddress, attempt_number: u32, err: &MailerError) -> Self {
        Self {
            kind,
            to: to.clone(),
            attempt_number,
            outcome: Outcome::Failure,
            message_id: None,
            error: Some(err.to_string()),
        }
    }

    fn trace(&self) {
        match (&self.message_id, &self.error) {
            (Some(id), _) => info!(
                kind = %self.kind,
                to = %self.to,
                attempt = self.attempt_number,
                message_id = %id,
                "email sent"
            ),
            (None, error) => warn!(
                kind = %self.kind,
                to = %self.to,
                attempt = self.attempt_number,
                max_attempts = MAX_SEND_ATTEMPTS,
                error = error.as_deref().unwrap_or_default(),
                "email delivery attempt failed"
            ),
        }
    }
}

/// Transactional email service implementation
#[derive(Debug, Clone)]
pub struct TransactionalEmailService<M>
where
    M: Mailer,
{
    mailer: Arc<M>,
    metrics: Arc<EmailMetrics>,
    settings: DeliverySettings,
}

impl<M> TransactionalEmailService<M>
where
    M: Mailer,
{
    /// Creates a new transactional email service.
    pub fn new(mailer: Arc<M>, metrics: Arc<EmailMetrics>, settings: DeliverySettings) -> Self {
        Self {
            mailer,
            metrics,
            settings,
        }
    }

    /// The registry this service reports outcomes to
    pub fn metrics(&self) -> &Arc<EmailMetrics> {
        &self.metrics
    }

    async fn deliver(&self, kind: EmailKind, message: &Message) -> Outcome {
        for attempt_number in 1..=MAX_SEND_ATTEMPTS {
            let attempt = match self.attempt(message).await {
                Ok(id) => SendAttempt::succeeded(kind, &message.to, attempt_number, id),
                Err(err) => SendAttempt::failed(kind, &message.to, attempt_number, &err),
            };

            attempt.trace();

            if attempt.outcome == Outcome::Success {
                return Outcome::Success;
            }

            let delay = self.settings.backoff_for(attempt_number);

            if attempt_number < MAX_SEND_ATTEMPTS && !delay.is_zero() {
                sleep(delay).await;
            }
        }

        Outcome::Failure
    }

    async fn attempt(&self, message: &Message) -> Result<MessageId, MailerError> {
        match self.settings.attempt_timeout {
            Some(limit) => timeout(limit, self.mailer.send_email(message))
                .await
                .map_err(|_| MailerError::Timeout(limit))?,
            None => self.mailer.send_email(message).await,
        }
    }
}

#[async_trait]
impl<M> TransactionalEmails for TransactionalEmailService<M>
where
    M: Mailer,
{
    async fn send(&self, kind: EmailKind, email: &OrderEmail) -> Result<(), NotificationError> {
        if !self.settings.provider_configured {
            info!(
                kind = %kind,
                to = %email.to,
                order_id = %email.order_id,
                "email provider is not configured, skipping send"
            );

            self.metrics.increment(kind, Outcome::Skipped);

            return Ok(());
        }

        let rendered = kind.render(email)?;

        let message = Message {
            from: self.settings.sender.clone(),
            to: email.to.clone(),
            subject: rendered.subject,
            html_body: rendered.html,
            plain_body: rendered.plain,
        };

        let outcome = self.deliver(kind, &message).await;

        if outcome == Outcome::Failure {
            error!(
                kind = %kind,
                to = %email.to,
                order_id = %email.order_id,
                attempts = MAX_SEND_ATTEMPTS,
                "giving up on email delivery"
            );
        }

        self.metrics.increment(kind, outcome);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use anyhow::anyhow;
    use testresult::TestResult;

    use crate::domain::communication::mailer::tests::MockMailer;

    use super::*;

    const SENDER: &str = "Storefront <orders@example.com>";

    fn service(
        mailer: MockMailer,
        settings: DeliverySettings,
    ) -> TestResult<TransactionalEmailService<MockMailer>> {
        Ok(TransactionalEmailService::new(
            Arc::new(mailer),
            Arc::new(EmailMetrics::new()?),
            settings,
        ))
    }

    fn order_email(order_id: &str, total_cents: Option<u64>) -> TestResult<OrderEmail> {
        Ok(OrderEmail::new(
            EmailAddress::new("u@example.com")?,
            order_id,
            total_cents,
        ))
    }

    #[tokio::test]
    async fn test_first_attempt_success_counts_once() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer
            .expect_send_email()
            .times(1)
            .returning(|_| Ok(MessageId::new("m1")));

        let service = service(mailer, DeliverySettings::new(SENDER))?;

        service
            .send_order_created(&order_email("o1", Some(1234))?)
            .await?;

        let metrics = service.metrics();
        assert_eq!(metrics.get(EmailKind::OrderCreated, Outcome::Success), 1);
        assert_eq!(metrics.get(EmailKind::OrderCreated, Outcome::Failure), 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_message_is_composed_from_template_and_settings() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer
            .expect_send_email()
            .times(1)
            .withf(|message| {
                message.from == SENDER
                    && message.to.as_str() == "u@example.com"
                    && message.subject == "Your order is on its way"
                    && message.html_body.contains("o5")
                    && message.plain_body.contains("o5")
            })
            .returning(|_| Ok(MessageId::new("m5")));

        let service = service(mailer, DeliverySettings::new(SENDER))?;

        service.send_order_shipped(&order_email("o5", None)?).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_exhausted_retries_count_one_failure_and_resolve() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer
            .expect_send_email()
            .times(MAX_SEND_ATTEMPTS as usize)
            .returning(|_| Err(MailerError::UnknownError(anyhow!("net err"))));

        let service = service(mailer, DeliverySettings::new(SENDER))?;

        let result = service.send_order_paid(&order_email("o2", Some(999))?).await;

        assert!(result.is_ok());

        let metrics = service.metrics();
        assert_eq!(metrics.get(EmailKind::OrderPaid, Outcome::Failure), 1);
        assert_eq!(metrics.get(EmailKind::OrderPaid, Outcome::Success), 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_retry_then_succeed_counts_one_success() -> TestResult {
        let mut mailer = MockMailer::new();
        let mut calls = 0;

        mailer.expect_send_email().times(3).returning(move |_| {
            calls += 1;

            if calls < 3 {
                Err(MailerError::UnknownError(anyhow!("connection reset")))
            } else {
                Ok(MessageId::new("m3"))
            }
        });

        let service = service(mailer, DeliverySettings::new(SENDER))?;

        service.send_order_cancelled(&order_email("o3", None)?).await?;

        let metrics = service.metrics();
        assert_eq!(metrics.get(EmailKind::OrderCancelled, Outcome::Success), 1);
        assert_eq!(metrics.get(EmailKind::OrderCancelled, Outcome::Failure), 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_retries_wait_between_attempts() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer
            .expect_send_email()
            .times(3)
            .returning(|_| Err(MailerError::UnknownError(anyhow!("connection reset"))));

        let settings = DeliverySettings::new(SENDER).with_retry_backoff(Duration::from_millis(20));
        let service = service(mailer, settings)?;

        let started = tokio::time::Instant::now();

        service.send_order_refunded(&order_email("o4", None)?).await?;

        // 20ms after the first failure, 40ms after the second, none after the last
        assert!(started.elapsed() >= Duration::from_millis(60));

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_sends_do_not_cross_contaminate() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer
            .expect_send_email()
            .times(1 + MAX_SEND_ATTEMPTS as usize)
            .returning(|message| {
                if message.subject == EmailKind::OrderPaid.subject() {
                    Err(MailerError::UnknownError(anyhow!("connection reset")))
                } else {
                    Ok(MessageId::new("ok"))
                }
            });

        let service = service(mailer, DeliverySettings::new(SENDER))?;

        let created = {
            let service = service.clone();
            let email = order_email("o1", Some(1234))?;
            tokio::spawn(async move { service.send_order_created(&email).await })
        };

        let paid = {
            let service = service.clone();
            let email = order_email("o2", Some(999))?;
            tokio::spawn(async move { service.send_order_paid(&email).await })
        };

        created.await??;
        paid.await??;

        let metrics = service.metrics();
        assert_eq!(metrics.get(EmailKind::OrderCreated, Outcome::Success), 1);
        assert_eq!(metrics.get(EmailKind::OrderCreated, Outcome::Failure), 0);
        assert_eq!(metrics.get(EmailKind::OrderPaid, Outcome::Failure), 1);
        assert_eq!(metrics.get(EmailKind::OrderPaid, Outcome::Success), 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_unconfigured_provider_is_a_noop() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer.expect_send_email().times(0);

        let service = service(mailer, DeliverySettings::new(SENDER).unconfigured())?;

        for kind in EmailKind::ALL {
            service.send(kind, &order_email("o6", None)?).await?;

            let metrics = service.metrics();
            assert_eq!(metrics.get(kind, Outcome::Skipped), 1);
            assert_eq!(metrics.get(kind, Outcome::Success), 0);
            assert_eq!(metrics.get(kind, Outcome::Failure), 0);
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_metric_deltas_across_sends() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer
            .expect_send_email()
            .times(2)
            .returning(|_| Ok(MessageId::new("m")));

        let service = service(mailer, DeliverySettings::new(SENDER))?;
        let email = order_email("o7", Some(100))?;

        service.send_order_created(&email).await?;
        let before = service.metrics().get(EmailKind::OrderCreated, Outcome::Success);

        service.send_order_created(&email).await?;
        let after = service.metrics().get(EmailKind::OrderCreated, Outcome::Success);

        assert_eq!(after - before, 1);

        Ok(())
    }

    #[derive(Debug, Clone)]
    struct SlowMailer;

    #[async_trait]
    impl Mailer for SlowMailer {
        async fn send_email(&self, _message: &Message) -> Result<MessageId, MailerError> {
            sleep(Duration::from_secs(5)).await;

            Ok(MessageId::new("too late"))
        }
    }

    #[tokio::test]
    async fn test_attempt_timeout_counts_as_failure() -> TestResult {
        let settings =
            DeliverySettings::new(SENDER).with_attempt_timeout(Some(Duration::from_millis(10)));
        let service = TransactionalEmailService::new(
            Arc::new(SlowMailer),
            Arc::new(EmailMetrics::new()?),
            settings,
        );

        service.send_order_paid(&order_email("o8", None)?).await?;

        assert_eq!(service.metrics().get(EmailKind::OrderPaid, Outcome::Failure), 1);

        Ok(())
    }
}
