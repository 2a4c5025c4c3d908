//! Mailer port: the delivery provider client

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

mod errors;
mod message;

pub use errors::MailerError;
pub use message::{Message, MessageId};

/// A delivery provider client
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Send a composed email
    ///
    /// # Arguments
    /// * `message` - The [`Message`] to deliver.
    ///
    /// # Returns
    /// - [`Ok`] with the provider's [`MessageId`] if the provider accepted the message.
    /// - [`Err`] containing a [`MailerError`] on any delivery failure.
    async fn send_email(&self, message: &Message) -> Result<MessageId, MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn send_email(&self, message: &Message) -> Result<MessageId, MailerError>;
    }
}
