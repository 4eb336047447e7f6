//! Cart lines.

use chrono::{DateTime, Utc};

use sales_chatbot_core::{CartId, ProductId, SessionId};

/// One add-to-cart event (`chatbot.carts` row).
///
/// Adding the same product twice yields two lines; lines are never merged.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CartLine {
    /// Row ID, increasing in insertion order.
    pub cart_id: CartId,
    /// Conversation the line belongs to.
    pub session_id: SessionId,
    /// Product name as it was when the line was added.
    pub product_name: String,
    /// Requested quantity (always positive).
    pub quantity: i32,
    /// Catalog product.
    pub product_id: ProductId,
    /// When the line was added.
    pub created_at: DateTime<Utc>,
}

impl CartLine {
    /// Render the line as the chatbot reads it back, e.g. `"2 Milk"`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} {}", self.quantity, self.product_name)
    }
}

/// Parameters for adding a cart line.
#[derive(Debug, Clone)]
pub struct NewCartLine {
    /// Conversation to add the line to.
    pub session_id: SessionId,
    /// Product name (denormalized).
    pub product_name: String,
    /// Requested quantity.
    pub quantity: i32,
    /// Catalog product.
    pub product_id: ProductId,
}
