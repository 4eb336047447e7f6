//! Product catalog repository.
//!
//! The webhook only reads the catalog; [`ProductRepository::upsert`] exists for
//! the CLI's `seed` command.

use sqlx::PgPool;
use tracing::{debug, instrument};

use sales_chatbot_core::{Availability, Price};

use super::RepositoryError;
use crate::models::Product;

/// Parameters for creating or updating a catalog product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Unique product name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Price in minor units.
    pub price: Price,
    /// Free-text stock status.
    pub availability_status: Availability,
}

/// Repository for catalog queries.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a product by its exact (case-sensitive) name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT product_id, name, description, price, availability_status
            FROM chatbot.products
            WHERE name = $1
            ",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// List all products ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT product_id, name, description, price, availability_status
            FROM chatbot.products
            ORDER BY product_id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Pick one product uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn random(&self) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT product_id, name, description, price, availability_status
            FROM chatbot.products
            ORDER BY random()
            LIMIT 1
            ",
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Insert a product, or update the existing product with the same name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn upsert(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO chatbot.products (name, description, price, availability_status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO UPDATE
            SET description = EXCLUDED.description,
                price = EXCLUDED.price,
                availability_status = EXCLUDED.availability_status
            RETURNING product_id, name, description, price, availability_status
            ",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.availability_status)
        .fetch_one(self.pool)
        .await?;

        debug!(product_id = %product.product_id, "Upserted product");
        Ok(product)
    }
}
