//! Orders created at checkout.

use chrono::{DateTime, Utc};

use sales_chatbot_core::{OrderId, ProductId};

/// A purchased cart line (`chatbot.orders` row).
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Order {
    /// Random order ID.
    pub order_id: OrderId,
    /// Catalog product.
    pub product_id: ProductId,
    /// Purchased quantity.
    pub quantity: i32,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}
