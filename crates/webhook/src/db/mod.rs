//! Database operations for the chatbot `PostgreSQL` schema.
//!
//! # Schema: `chatbot`
//!
//! ## Tables
//!
//! - `products` - Catalog (seeded by the CLI, read-only here)
//! - `carts` - One row per add-to-cart event, keyed by (`cart_id`, `session_id`)
//! - `orders` - One row per purchased cart line
//!
//! # Migrations
//!
//! Migrations are stored in `crates/webhook/migrations/` and run via:
//! ```bash
//! cargo run -p sales-chatbot-cli -- migrate
//! ```
//! or on server startup with `WEBHOOK_AUTO_MIGRATE=true`.
//!
//! # Store
//!
//! The intent dispatcher talks to storage through the [`Store`] trait.
//! [`PgStore`] is the production implementation; every call acquires a pooled
//! connection (or transaction) for its own duration and releases it on drop,
//! including when the call fails.

pub mod carts;
pub mod orders;
pub mod products;

#[cfg(test)]
pub(crate) mod memory;

use std::future::Future;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use sales_chatbot_core::SessionId;

pub use carts::CartRepository;
pub use orders::OrderRepository;
pub use products::{NewProduct, ProductRepository};

use crate::models::{CartLine, NewCartLine, Order, Product};

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Constraint violation (e.g., cart line for a product that no longer exists).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Apply any pending migrations.
///
/// # Errors
///
/// Returns `RepositoryError::Migration` if a migration fails or the applied
/// history does not match the embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), RepositoryError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Storage operations needed to fulfill intents.
pub trait Store: Send + Sync {
    /// Look up a product by its exact name.
    fn find_product_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Product>, RepositoryError>> + Send;

    /// All products, in catalog order.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, RepositoryError>> + Send;

    /// One product chosen uniformly at random, or `None` for an empty catalog.
    fn random_product(
        &self,
    ) -> impl Future<Output = Result<Option<Product>, RepositoryError>> + Send;

    /// Append a line to a session's cart.
    fn add_cart_line(
        &self,
        line: NewCartLine,
    ) -> impl Future<Output = Result<CartLine, RepositoryError>> + Send;

    /// A session's cart lines, in the order they were added.
    fn cart_lines(
        &self,
        session_id: &SessionId,
    ) -> impl Future<Output = Result<Vec<CartLine>, RepositoryError>> + Send;

    /// Atomically empty a session's cart, creating one order per removed line.
    fn checkout(
        &self,
        session_id: &SessionId,
    ) -> impl Future<Output = Result<Vec<Order>, RepositoryError>> + Send;
}

/// `PostgreSQL`-backed [`Store`].
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl Store for PgStore {
    async fn find_product_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError> {
        ProductRepository::new(&self.pool).get_by_name(name).await
    }

    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        ProductRepository::new(&self.pool).list().await
    }

    async fn random_product(&self) -> Result<Option<Product>, RepositoryError> {
        ProductRepository::new(&self.pool).random().await
    }

    async fn add_cart_line(&self, line: NewCartLine) -> Result<CartLine, RepositoryError> {
        CartRepository::new(&self.pool).add(&line).await
    }

    async fn cart_lines(&self, session_id: &SessionId) -> Result<Vec<CartLine>, RepositoryError> {
        CartRepository::new(&self.pool).list_for_session(session_id).await
    }

    async fn checkout(&self, session_id: &SessionId) -> Result<Vec<Order>, RepositoryError> {
        OrderRepository::new(&self.pool).checkout(session_id).await
    }
}
