//! Order notification emails: kinds, parameters and rendering

use std::fmt;

use askama::Template;
use serde::{Deserialize, Serialize};

use crate::domain::communication::email_addresses::EmailAddress;

mod errors;
mod order_cancelled;
mod order_created;
mod order_paid;
mod order_refunded;
mod order_shipped;

pub use errors::RenderError;
pub use order_cancelled::OrderCancelledTemplate;
pub use order_created::OrderCreatedTemplate;
pub use order_paid::OrderPaidTemplate;
pub use order_refunded::OrderRefundedTemplate;
pub use order_shipped::OrderShippedTemplate;

/// Which transactional template is being sent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailKind {
    /// The order was placed
    OrderCreated,

    /// Payment for the order was captured
    OrderPaid,

    /// The order was cancelled
    OrderCancelled,

    /// The order left the warehouse
    OrderShipped,

    /// The order was refunded
    OrderRefunded,
}

impl EmailKind {
    /// Every kind, in lifecycle order
    pub const ALL: [EmailKind; 5] = [
        Self::OrderCreated,
        Self::OrderPaid,
        Self::OrderCancelled,
        Self::OrderShipped,
        Self::OrderRefunded,
    ];

    /// The label used in metrics and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrderCreated => "order_created",
            Self::OrderPaid => "order_paid",
            Self::OrderCancelled => "order_cancelled",
            Self::OrderShipped => "order_shipped",
            Self::OrderRefunded => "order_refunded",
        }
    }

    /// Gets the fixed subject line for this kind
    pub fn subject(&self) -> &'static str {
        match self {
            Self::OrderCreated => "We received your order",
            Self::OrderPaid => "Payment received for your order",
            Self::OrderCancelled => "Your order has been cancelled",
            Self::OrderShipped => "Your order is on its way",
            Self::OrderRefunded => "Your refund has been issued",
        }
    }

    /// Renders the template for this kind to HTML (with inlined CSS) and plain text.
    pub fn render(&self, email: &OrderEmail) -> Result<RenderedEmail, RenderError> {
        let (html, plain) = match self {
            Self::OrderCreated => {
                let template = OrderCreatedTemplate::new(email);
                (template.render()?, template.render_plain())
            }
            Self::OrderPaid => {
                let template = OrderPaidTemplate::new(email);
                (template.render()?, template.render_plain())
            }
            Self::OrderCancelled => {
                let template = OrderCancelledTemplate::new(email);
                (template.render()?, template.render_plain())
            }
            Self::OrderShipped => {
                let template = OrderShippedTemplate::new(email);
                (template.render()?, template.render_plain())
            }
            Self::OrderRefunded => {
                let template = OrderRefundedTemplate::new(email);
                (template.render()?, template.render_plain())
            }
        };

        Ok(RenderedEmail {
            subject: self.subject().to_string(),
            html: css_inline::inline(&html)?,
            plain,
        })
    }
}

impl fmt::Display for EmailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters shared by every order email
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderEmail {
    /// The customer's address
    pub to: EmailAddress,

    /// The storefront order id
    pub order_id: String,

    /// Order total in minor currency units
    pub total_cents: Option<u64>,
}

impl OrderEmail {
    /// Creates a new `OrderEmail`
    pub fn new(to: EmailAddress, order_id: impl Into<String>, total_cents: Option<u64>) -> Self {
        Self {
            to,
            order_id: order_id.into(),
            total_cents,
        }
    }

    /// The total formatted for display, e.g. `$12.34`
    pub fn formatted_total(&self) -> Option<String> {
        self.total_cents.map(format_cents)
    }
}

/// A rendered email body pair with its subject
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedEmail {
    /// Subject line
    pub subject: String,

    /// HTML body with CSS inlined
    pub html: String,

    /// Plain text body
    pub plain: String,
}

fn format_cents(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}
