//! Order shipped template

use askama::Template;

use super::OrderEmail;

/// Sent when an order leaves the warehouse
#[derive(Debug, Template)]
#[template(path = "emails/orders/order_shipped.html")]
pub struct OrderShippedTemplate {
    pub order_id: String,
    pub total: Option<String>,
}

impl OrderShippedTemplate {
    /// Creates a new `OrderShippedTemplate`
    pub fn new(email: &OrderEmail) -> Self {
        Self {
            order_id: email.order_id.clone(),
            total: email.formatted_total(),
        }
    }

    /// Renders the plain text version of the email
    pub fn render_plain(&self) -> String {
        let mut plain = format!(
            "Good news! Your order {order_id} has shipped and is on its way to you.\n",
            order_id = self.order_id
        );

        if let Some(total) = &self.total {
            plain.push_str(&format!("\nTotal: {total}\n"));
        }

        plain
    }
}
