//! Customer-facing fulfillment texts.
//!
//! Every reply the chatbot can give is built here so wording changes stay in
//! one place.

use crate::models::{CartLine, Product};

/// Separator between listed items.
const LIST_SEPARATOR: &str = ", ";

/// Confirmation after a line was added to the cart.
pub fn added_to_cart(quantity: i32, product_name: &str) -> String {
    format!(
        "Added {quantity} {product_name} into your cart. Do you prefer to check your cart, add more items or complete the purchase?"
    )
}

/// The requested product exists but cannot be sold right now.
pub fn out_of_stock(product_name: &str) -> String {
    format!("Sorry, {product_name} is currently out of stock.")
}

/// The requested product is not in the catalog.
pub fn not_carried(product_name: &str) -> String {
    format!("Sorry, we don't have {product_name} at the moment.")
}

/// Cart contents, e.g. `"Your cart contains: 2 Milk, 1 Bread. ..."`.
///
/// An empty cart renders an empty list.
pub fn cart_contents(lines: &[CartLine]) -> String {
    let items = lines
        .iter()
        .map(CartLine::summary)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR);
    format!("Your cart contains: {items}. Do you prefer to add more items or complete the purchase?")
}

/// Checkout finished.
pub const PURCHASE_SUCCESS: &str = "Purchase Success. Visit Again";

/// Details of one product.
pub fn product_details(product: &Product) -> String {
    format!(
        "Here it is!!! {}. Rs {}. The {} is {}.",
        product.description, product.price, product.name, product.availability_status
    )
}

/// Information was asked for a product that is not in the catalog.
pub fn product_unavailable(product_name: &str) -> String {
    format!("Unfortunately, '{product_name}' is unavailable at the moment.")
}

/// `product.information` arrived without a product.
pub const DID_NOT_CATCH: &str = "Sorry, I didn't catch that.";

/// Catalog listing.
pub fn catalog(products: &[Product]) -> String {
    let names = products
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR);
    format!("Here are the available products: {names}")
}

/// A random product suggestion.
pub fn recommendation(product: &Product) -> String {
    format!(
        "I recommend {}. {}. Price: {}. Availability Status: {}",
        product.name, product.description, product.price, product.availability_status
    )
}

/// Nothing to recommend.
pub const NOTHING_TO_RECOMMEND: &str =
    "Sorry, there are no products available for recommendation at the moment.";

/// The intent is not one this webhook fulfills.
pub const UNSUPPORTED_INTENT: &str = "Sorry, I can't help with that yet.";
