//! Order refunded template

use askama::Template;

use super::OrderEmail;

/// Sent when an order is refunded
#[derive(Debug, Template)]
#[template(path = "emails/orders/order_refunded.html")]
pub struct OrderRefundedTemplate {
    /// The order id
    pub order_id: String,

    /// The formatted refund amount, if known
    pub total: Option<String>,
}

impl OrderRefundedTemplate {
    /// Creates a new `OrderRefundedTemplate`
    pub fn new(email: &OrderEmail) -> Self {
        Self {
            order_id: email.order_id.clone(),
            total: email.formatted_total(),
        }
    }

    /// Renders the plain text version of the email
    pub fn render_plain(&self) -> String {
        let mut plain = format!(
            "We've issued a refund for order {order_id}. Depending on your bank it can take 5-10 business days to appear.\n",
            order_id = self.order_id
        );

        if let Some(total) = &self.total {
            plain.push_str(&format!("\nTotal: {total}\n"));
        }

        plain
    }
}
