//! Core types for the sales chatbot.
//!
//! This module provides type-safe wrappers for the chatbot's domain concepts.

pub mod availability;
pub mod id;
pub mod intent;
pub mod price;
pub mod session;

pub use availability::Availability;
pub use id::{CartId, OrderId, ProductId};
pub use intent::{Intent, UnknownIntent};
pub use price::Price;
pub use session::SessionId;
