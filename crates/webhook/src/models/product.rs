//! Catalog product.

use serde::{Deserialize, Serialize};

use sales_chatbot_core::{Availability, Price, ProductId};

/// A catalog product (`chatbot.products` row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Catalog key.
    pub product_id: ProductId,
    /// Unique display name; this is what the Dialogflow `product` entity resolves to.
    pub name: String,
    /// Short description read back to the customer.
    pub description: String,
    /// Price in minor units.
    pub price: Price,
    /// Free-text stock status.
    pub availability_status: Availability,
}

impl Product {
    /// Whether the product can be added to a cart.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.availability_status.is_in_stock()
    }
}
