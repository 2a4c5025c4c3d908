//! Delivery settings

use std::time::Duration;

/// Attempts per logical send, the initial one included.
pub const MAX_SEND_ATTEMPTS: u32 = 3;

/// How the sender talks to the delivery provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliverySettings {
    /// Sender mailbox placed in the `From` header
    pub sender: String,

    /// Whether provider credentials are present; sends are skipped otherwise
    pub provider_configured: bool,

    /// Linear backoff step between attempts
    pub retry_backoff: Duration,

    /// Upper bound for a single provider call
    pub attempt_timeout: Option<Duration>,
}

impl DeliverySettings {
    /// Settings for a configured provider with no backoff and no timeout
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            provider_configured: true,
            retry_backoff: Duration::ZERO,
            attempt_timeout: None,
        }
    }

    /// Marks the provider as unconfigured
    pub fn unconfigured(mut self) -> Self {
        self.provider_configured = false;
        self
    }

    /// Sets the linear backoff step
    pub fn with_retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    /// Sets the per-attempt timeout
    pub fn with_attempt_timeout(mut self, attempt_timeout: Option<Duration>) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    /// Delay after the failed attempt `attempt_number` (1-based), saturating
    /// at [`Duration::MAX`]
    pub fn backoff_for(&self, attempt_number: u32) -> Duration {
        self.retry_backoff.saturating_mul(attempt_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_is_linear() {
        let settings = DeliverySettings::new("orders@example.com")
            .with_retry_backoff(Duration::from_millis(250));

        assert_eq!(settings.backoff_for(1), Duration::from_millis(250));
        assert_eq!(settings.backoff_for(2), Duration::from_millis(500));
    }

    #[test]
    fn test_backoff_saturates_instead_of_overflowing() {
        let settings = DeliverySettings::new("orders@example.com")
            .with_retry_backoff(Duration::from_millis(u64::MAX));

        assert_eq!(settings.backoff_for(1), Duration::from_millis(u64::MAX));
        assert_eq!(settings.backoff_for(MAX_SEND_ATTEMPTS), Duration::MAX);
    }

    #[test]
    fn test_unconfigured() {
        let settings = DeliverySettings::new("orders@example.com").unconfigured();

        assert!(!settings.provider_configured);
        assert_eq!(settings.backoff_for(2), Duration::ZERO);
    }
}
