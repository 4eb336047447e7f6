//! In-memory [`Store`] for unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use rand::seq::IndexedRandom;

use sales_chatbot_core::{Availability, CartId, OrderId, Price, ProductId, SessionId};

use super::{RepositoryError, Store};
use crate::models::{CartLine, NewCartLine, Order, Product};

#[derive(Default)]
struct Tables {
    products: Vec<Product>,
    carts: Vec<CartLine>,
    orders: Vec<Order>,
    next_cart_id: i32,
}

/// Mirrors the `PostgreSQL` store's semantics over plain vectors.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a catalog product, returning its ID.
    pub fn insert_product(&self, name: &str, description: &str, price: i32, status: &str) -> ProductId {
        let mut tables = self.lock();
        let product_id = ProductId::new(i32::try_from(tables.products.len()).unwrap_or(i32::MAX) + 1);
        tables.products.push(Product {
            product_id,
            name: name.to_owned(),
            description: description.to_owned(),
            price: Price::new(price),
            availability_status: Availability::new(status),
        });
        product_id
    }

    /// Make every subsequent call fail like a lost database connection.
    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn carts_for(&self, session_id: &SessionId) -> Vec<CartLine> {
        self.lock()
            .carts
            .iter()
            .filter(|line| &line.session_id == session_id)
            .cloned()
            .collect()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.lock().orders.clone()
    }

    pub fn total_cart_lines(&self) -> usize {
        self.lock().carts.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

impl Store for MemoryStore {
    async fn find_product_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError> {
        self.check()?;
        Ok(self.lock().products.iter().find(|p| p.name == name).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        self.check()?;
        Ok(self.lock().products.clone())
    }

    async fn random_product(&self) -> Result<Option<Product>, RepositoryError> {
        self.check()?;
        Ok(self.lock().products.choose(&mut rand::rng()).cloned())
    }

    async fn add_cart_line(&self, line: NewCartLine) -> Result<CartLine, RepositoryError> {
        self.check()?;
        let mut tables = self.lock();
        if !tables.products.iter().any(|p| p.product_id == line.product_id) {
            return Err(RepositoryError::Conflict(format!(
                "product {} does not exist",
                line.product_id
            )));
        }
        tables.next_cart_id += 1;
        let row = CartLine {
            cart_id: CartId::new(tables.next_cart_id),
            session_id: line.session_id,
            product_name: line.product_name,
            quantity: line.quantity,
            product_id: line.product_id,
            created_at: Utc::now(),
        };
        tables.carts.push(row.clone());
        Ok(row)
    }

    async fn cart_lines(&self, session_id: &SessionId) -> Result<Vec<CartLine>, RepositoryError> {
        self.check()?;
        Ok(self.carts_for(session_id))
    }

    async fn checkout(&self, session_id: &SessionId) -> Result<Vec<Order>, RepositoryError> {
        self.check()?;
        let mut tables = self.lock();
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut tables.carts)
            .into_iter()
            .partition(|line| &line.session_id == session_id);
        tables.carts = kept;

        let orders: Vec<Order> = removed
            .into_iter()
            .map(|line| Order {
                order_id: OrderId::generate(),
                product_id: line.product_id,
                quantity: line.quantity,
                created_at: Utc::now(),
            })
            .collect();
        tables.orders.extend(orders.iter().cloned());
        Ok(orders)
    }
}
