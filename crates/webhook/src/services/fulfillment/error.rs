//! Fulfillment error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::ParameterError;

/// Errors that can occur while fulfilling an intent.
///
/// Catalog misses, out-of-stock products and unknown intents are not errors;
/// they produce fulfillment text for the customer.
#[derive(Debug, Error)]
pub enum FulfillmentError {
    /// A parameter the intent depends on is missing or malformed.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
