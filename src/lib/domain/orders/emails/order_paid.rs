//! Order paid template

use askama::Template;

use super::OrderEmail;

/// Sent once payment for an order is captured
#[derive(Debug, Template)]
#[template(path = "emails/orders/order_paid.html")]
pub struct OrderPaidTemplate {
    /// The order id
    pub order_id: String,

    /// The formatted amount paid, if known
    pub total: Option<String>,
}

impl OrderPaidTemplate {
    /// Creates a new `OrderPaidTemplate`
    pub fn new(email: &OrderEmail) -> Self {
        Self {
            order_id: email.order_id.clone(),
            total: email.formatted_total(),
        }
    }

    /// Renders the plain text version of the email
    pub fn render_plain(&self) -> String {
        let mut plain = format!(
            "We've received your payment for order {order_id}. We'll email you again when it ships.\n",
            order_id = self.order_id
        );

        if let Some(total) = &self.total {
            plain.push_str(&format!("\nTotal: {total}\n"));
        }

        plain
    }
}
