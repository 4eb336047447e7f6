//! Intents handled by the fulfillment webhook.
//!
//! Intent names are configured in the Dialogflow agent and arrive as
//! `queryResult.intent.displayName`. Matching is exact and case-sensitive.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An intent the webhook knows how to fulfill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// `add.product` - add a product line to the session's cart.
    #[serde(rename = "add.product")]
    AddProduct,
    /// `show.cart` - list the session's cart lines.
    #[serde(rename = "show.cart")]
    ShowCart,
    /// `purchase.complete` - turn the cart into orders.
    #[serde(rename = "purchase.complete")]
    PurchaseComplete,
    /// `product.information` - describe a single product.
    #[serde(rename = "product.information")]
    ProductInformation,
    /// `product.inquiry` - list the catalog.
    #[serde(rename = "product.inquiry")]
    ProductInquiry,
    /// `product.recommend` - suggest a random product.
    #[serde(rename = "product.recommend")]
    ProductRecommend,
}

/// The intent name is not one the webhook fulfills.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown intent: {0}")]
pub struct UnknownIntent(pub String);

impl Intent {
    /// Every supported intent.
    pub const ALL: [Self; 6] = [
        Self::AddProduct,
        Self::ShowCart,
        Self::PurchaseComplete,
        Self::ProductInformation,
        Self::ProductInquiry,
        Self::ProductRecommend,
    ];

    /// The Dialogflow display name of this intent.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AddProduct => "add.product",
            Self::ShowCart => "show.cart",
            Self::PurchaseComplete => "purchase.complete",
            Self::ProductInformation => "product.information",
            Self::ProductInquiry => "product.inquiry",
            Self::ProductRecommend => "product.recommend",
        }
    }

    /// Whether fulfilling this intent writes to the database.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        matches!(self, Self::AddProduct | Self::PurchaseComplete)
    }
}

impl FromStr for Intent {
    type Err = UnknownIntent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| UnknownIntent(s.to_owned()))
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_display_name() {
        for intent in Intent::ALL {
            assert_eq!(intent.as_str().parse::<Intent>().unwrap(), intent);
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("Add.Product".parse::<Intent>().is_err());
        assert!(" add.product".parse::<Intent>().is_err());
        assert_eq!(
            "order.status".parse::<Intent>(),
            Err(UnknownIntent("order.status".to_string()))
        );
    }

    #[test]
    fn test_only_cart_writes_are_mutating() {
        let mutating: Vec<_> = Intent::ALL.into_iter().filter(Intent::is_mutating).collect();
        assert_eq!(mutating, vec![Intent::AddProduct, Intent::PurchaseComplete]);
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&Intent::ShowCart).unwrap();
        assert_eq!(json, "\"show.cart\"");
        let parsed: Intent = serde_json::from_str("\"product.recommend\"").unwrap();
        assert_eq!(parsed, Intent::ProductRecommend);
    }
}
