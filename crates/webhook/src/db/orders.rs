//! Order repository and checkout.

use sqlx::PgPool;
use tracing::{info, instrument};

use sales_chatbot_core::{CartId, OrderId, ProductId, SessionId};

use super::RepositoryError;
use crate::models::Order;

/// Repository for orders.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

/// A cart line removed during checkout.
#[derive(sqlx::FromRow)]
struct RemovedLine {
    cart_id: CartId,
    product_id: ProductId,
    quantity: i32,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Turn a session's cart into orders.
    ///
    /// Runs in a single transaction: the session's cart rows are deleted with
    /// `RETURNING`, then one order with a fresh ID is inserted per deleted row.
    /// A concurrent checkout of the same session blocks on the row locks taken
    /// by the delete and, once this transaction commits, finds nothing left to
    /// delete. An empty cart commits with no orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction is rolled back and the cart is left intact.
    #[instrument(skip(self))]
    pub async fn checkout(&self, session_id: &SessionId) -> Result<Vec<Order>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let mut removed = sqlx::query_as::<_, RemovedLine>(
            r"
            DELETE FROM chatbot.carts
            WHERE session_id = $1
            RETURNING cart_id, product_id, quantity
            ",
        )
        .bind(session_id)
        .fetch_all(&mut *tx)
        .await?;

        // DELETE ... RETURNING has no ordering guarantee
        removed.sort_by_key(|line| line.cart_id);

        let mut orders = Vec::with_capacity(removed.len());
        for line in removed {
            let order = sqlx::query_as::<_, Order>(
                r"
                INSERT INTO chatbot.orders (order_id, product_id, quantity)
                VALUES ($1, $2, $3)
                RETURNING order_id, product_id, quantity, created_at
                ",
            )
            .bind(OrderId::generate())
            .bind(line.product_id)
            .bind(line.quantity)
            .fetch_one(&mut *tx)
            .await?;

            orders.push(order);
        }

        tx.commit().await?;

        info!(orders = orders.len(), "Checkout complete");
        Ok(orders)
    }

    /// Count all orders ever placed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chatbot.orders")
            .fetch_one(self.pool)
            .await?;

        Ok(row.0)
    }
}
