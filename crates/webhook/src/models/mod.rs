//! Domain models for the fulfillment webhook.
//!
//! - [`product`], [`cart`], [`order`] - database rows
//! - [`webhook`] - Dialogflow fulfillment request/response wire types

pub mod cart;
pub mod order;
pub mod product;
pub mod webhook;

pub use cart::{CartLine, NewCartLine};
pub use order::Order;
pub use product::Product;
pub use webhook::{
    IntentRef, OutputContext, ParameterError, Parameters, QueryResult, WebhookRequest,
    WebhookResponse,
};
