//! Transactional order emails with bounded retry and outcome counters

mod errors;
mod metrics;
mod service;
mod settings;

pub use errors::NotificationError;
pub use metrics::{EmailMetrics, Outcome, EMAIL_SENDS_TOTAL};
pub use service::{SendAttempt, TransactionalEmailService, TransactionalEmails};
pub use settings::{DeliverySettings, MAX_SEND_ATTEMPTS};
