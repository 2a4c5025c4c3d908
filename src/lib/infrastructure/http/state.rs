//! Application state module

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};

use crate::domain::orders::notifications::{EmailMetrics, TransactionalEmails};

/// Global application state
#[derive(Clone)]
pub struct AppState<T: TransactionalEmails> {
    /// The time the server started
    pub start_time: DateTime<Utc>,

    /// Transactional email service
    pub emails: Arc<T>,

    /// Send counters shared with the email service
    pub metrics: Arc<EmailMetrics>,
}

impl<T> AppState<T>
where
    T: TransactionalEmails,
{
    /// Create a new application state
    pub fn new(emails: T, metrics: Arc<EmailMetrics>) -> Self {
        Self {
            start_time: Utc::now(),
            emails: Arc::new(emails),
            metrics,
        }
    }
}

impl<T> fmt::Debug for AppState<T>
where
    T: TransactionalEmails,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("start_time", &self.start_time)
            .field("emails", &"TransactionalEmails")
            .field("metrics", &self.metrics)
            .finish()
    }
}
