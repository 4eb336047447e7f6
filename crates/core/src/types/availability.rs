//! Product stock status.

use serde::{Deserialize, Serialize};

/// Free-text availability status of a catalog product.
///
/// The catalog is curated by hand, so the status is kept as written. Only the
/// exact value [`Availability::IN_STOCK`] allows adding the product to a cart;
/// anything else ("out of stock", "back in June", ...) is treated as
/// unavailable and shown to the customer verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct Availability(String);

impl Availability {
    /// The status that marks a product as purchasable.
    pub const IN_STOCK: &'static str = "in stock";

    /// Wrap a status string.
    #[must_use]
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    /// Shorthand for an in-stock status.
    #[must_use]
    pub fn in_stock() -> Self {
        Self(Self::IN_STOCK.to_owned())
    }

    /// Whether the product can be added to a cart.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.0 == Self::IN_STOCK
    }

    /// Get the status as written in the catalog.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_exact_in_stock_is_purchasable() {
        assert!(Availability::in_stock().is_in_stock());
        assert!(Availability::new("in stock").is_in_stock());
        assert!(!Availability::new("In Stock").is_in_stock());
        assert!(!Availability::new("in stock ").is_in_stock());
        assert!(!Availability::new("out of stock").is_in_stock());
    }

    #[test]
    fn test_display_is_verbatim() {
        assert_eq!(Availability::new("back in June").to_string(), "back in June");
    }
}
