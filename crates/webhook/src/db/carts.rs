//! Cart repository.

use sqlx::PgPool;
use tracing::{debug, instrument};

use sales_chatbot_core::SessionId;

use super::RepositoryError;
use crate::models::{CartLine, NewCartLine};

/// Repository for per-session cart lines.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append a line to a session's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product no longer exists.
    /// Returns `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, line), fields(session_id = %line.session_id, product_id = %line.product_id))]
    pub async fn add(&self, line: &NewCartLine) -> Result<CartLine, RepositoryError> {
        let row = sqlx::query_as::<_, CartLine>(
            r"
            INSERT INTO chatbot.carts (session_id, product_name, quantity, product_id)
            VALUES ($1, $2, $3, $4)
            RETURNING cart_id, session_id, product_name, quantity, product_id, created_at
            ",
        )
        .bind(&line.session_id)
        .bind(&line.product_name)
        .bind(line.quantity)
        .bind(line.product_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::Conflict(format!(
                    "product {} does not exist",
                    line.product_id
                ));
            }
            RepositoryError::Database(e)
        })?;

        debug!(cart_id = %row.cart_id, "Added cart line");
        Ok(row)
    }

    /// List a session's cart lines in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_for_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = sqlx::query_as::<_, CartLine>(
            r"
            SELECT cart_id, session_id, product_name, quantity, product_id, created_at
            FROM chatbot.carts
            WHERE session_id = $1
            ORDER BY cart_id
            ",
        )
        .bind(session_id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }
}
