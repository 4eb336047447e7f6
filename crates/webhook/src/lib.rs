//! Sales chatbot fulfillment webhook library.
//!
//! This crate provides the webhook as a library, allowing the router to be
//! tested in-process and the schema/catalog code to be reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
