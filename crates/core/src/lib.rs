//! Sales Chatbot Core - Shared domain types.
//!
//! This crate provides the types shared by the fulfillment webhook and the
//! operator CLI:
//! - `webhook` - Dialogflow fulfillment endpoint
//! - `cli` - Migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Row mapping for `PostgreSQL` is available behind the
//! `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, session resolution, intents, prices and stock status

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
