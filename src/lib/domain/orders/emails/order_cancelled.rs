//! Order cancelled template

use askama::Template;

use super::OrderEmail;

/// Sent when an order is cancelled
#[derive(Debug, Template)]
#[template(path = "emails/orders/order_cancelled.html")]
pub struct OrderCancelledTemplate {
    /// The order id
    pub order_id: String,

    /// The formatted order total, if known
    pub total: Option<String>,
}

impl OrderCancelledTemplate {
    /// Creates a new `OrderCancelledTemplate`
    pub fn new(email: &OrderEmail) -> Self {
        Self {
            order_id: email.order_id.clone(),
            total: email.formatted_total(),
        }
    }

    /// Renders the plain text version of the email
    pub fn render_plain(&self) -> String {
        let mut plain = format!(
            "Your order {order_id} has been cancelled. If you were charged, a refund will follow shortly.\n",
            order_id = self.order_id
        );

        if let Some(total) = &self.total {
            plain.push_str(&format!("\nTotal: {total}\n"));
        }

        plain
    }
}
