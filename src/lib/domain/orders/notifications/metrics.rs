//! Email send counters

use std::fmt;

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::domain::orders::emails::EmailKind;

/// Metric name for the send counter
pub const EMAIL_SENDS_TOTAL: &str = "email_sends_total";

const EMAIL_SENDS_HELP: &str = "Transactional email sends by template kind and terminal outcome.";

/// Terminal result of one logical send
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The provider accepted the email
    Success,

    /// Every attempt failed
    Failure,

    /// No provider credentials were configured, nothing was sent
    Skipped,
}

impl Outcome {
    /// The label used in metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-lifetime `email_sends_total` counters labelled by `kind` and `outcome`.
///
/// Each instance owns its registry, so counters never leak between instances.
/// The registry sorts series by label values when gathering, which keeps
/// [`EmailMetrics::render`] ordered by kind, then outcome.
#[derive(Clone)]
pub struct EmailMetrics {
    registry: Registry,
    sends: IntCounterVec,
}

impl fmt::Debug for EmailMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailMetrics").finish_non_exhaustive()
    }
}

impl EmailMetrics {
    /// Creates a registry holding only the send counter
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();
        let sends = IntCounterVec::new(
            Opts::new(EMAIL_SENDS_TOTAL, EMAIL_SENDS_HELP),
            &["kind", "outcome"],
        )?;

        registry.register(Box::new(sends.clone()))?;

        Ok(Self { registry, sends })
    }

    /// Adds one to the `(kind, outcome)` series, creating it first if absent.
    pub fn increment(&self, kind: EmailKind, outcome: Outcome) {
        self.sends
            .with_label_values(&[kind.as_str(), outcome.as_str()])
            .inc();
    }

    /// Current value of a series, zero if it was never incremented.
    ///
    /// Reads from a gathered snapshot so looking up a missing series does not
    /// create it.
    pub fn get(&self, kind: EmailKind, outcome: Outcome) -> u64 {
        self.registry
            .gather()
            .iter()
            .flat_map(|family| family.get_metric())
            .find(|metric| {
                metric.get_label().iter().all(|pair| match pair.get_name() {
                    "kind" => pair.get_value() == kind.as_str(),
                    "outcome" => pair.get_value() == outcome.as_str(),
                    _ => false,
                })
            })
            .map(|metric| metric.get_counter().get_value() as u64)
            .unwrap_or(0)
    }

    /// Prometheus text exposition of every known series, empty before the
    /// first increment.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buffer = Vec::new();

        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;

        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
