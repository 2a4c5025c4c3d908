//! Mailer errors

use std::time::Duration;

use thiserror::Error;

/// Mailer errors
#[derive(Debug, Error)]
pub enum MailerError {
    /// Invalid sender or recipient address
    #[error("invalid email address")]
    InvalidEmail,

    /// The provider did not answer within the attempt timeout
    #[error("the provider did not respond within {0:?}")]
    Timeout(Duration),

    /// The provider answered with a non-success status
    #[error("the provider rejected the email with status {status}: {body}")]
    Rejected {
        /// HTTP status returned by the provider
        status: u16,

        /// Response body returned by the provider
        body: String,
    },

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        MailerError::UnknownError(err)
    }
}
