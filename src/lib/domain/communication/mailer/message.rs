//! Email message

use std::fmt;

use crate::domain::communication::email_addresses::EmailAddress;

/// A composed email, ready to hand to a [`super::Mailer`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// The sender mailbox, e.g. `Storefront <orders@example.com>`
    pub from: String,

    /// The recipient of the email
    pub to: EmailAddress,

    /// The subject of the email
    pub subject: String,

    /// The HTML body of the email
    pub html_body: String,

    /// The plain text body of the email
    pub plain_body: String,
}

/// Identifier the provider assigned to an accepted message
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageId(String);

impl MessageId {
    /// Wraps a provider message id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
