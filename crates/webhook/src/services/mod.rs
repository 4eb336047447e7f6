//! Business logic services for the webhook.
//!
//! # Services
//!
//! - `fulfillment` - Intent dispatch and the cart/catalog operations behind each intent

pub mod fulfillment;
