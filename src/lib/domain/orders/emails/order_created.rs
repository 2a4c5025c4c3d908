//! Order created template

use askama::Template;

use super::OrderEmail;

/// Sent when the customer places an order
#[derive(Debug, Template)]
#[template(path = "emails/orders/order_created.html")]
pub struct OrderCreatedTemplate {
    /// The order id
    pub order_id: String,

    /// The formatted order total, if known
    pub total: Option<String>,
}

impl OrderCreatedTemplate {
    /// Creates a new `OrderCreatedTemplate`
    pub fn new(email: &OrderEmail) -> Self {
        Self {
            order_id: email.order_id.clone(),
            total: email.formatted_total(),
        }
    }

    /// Renders the plain text version of the email
    pub fn render_plain(&self) -> String {
        let mut plain = format!(
            "Thanks for your order! We've received order {order_id} and will let you know as soon as payment is confirmed.\n",
            order_id = self.order_id
        );

        if let Some(total) = &self.total {
            plain.push_str(&format!("\nTotal: {total}\n"));
        }

        plain
    }
}
