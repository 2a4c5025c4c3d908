use thiserror::Error;
use tracing::debug;

use crate::domain::orders::emails::RenderError;

/// Errors surfaced to callers of the transactional email sender.
///
/// Delivery failures are never returned; they are counted instead.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The email could not be rendered
    #[error(transparent)]
    RenderError(RenderError),
}

impl From<RenderError> for NotificationError {
    fn from(err: RenderError) -> Self {
        debug!("RenderError -> NotificationError");

        NotificationError::RenderError(err)
    }
}
