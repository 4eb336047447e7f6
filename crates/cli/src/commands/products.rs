//! Catalog inspection commands.

use sales_chatbot_webhook::db::ProductRepository;

use super::{CommandError, connect};

/// Log every catalog product, ordered by ID.
///
/// # Errors
///
/// Returns an error if the database connection or query fails.
pub async fn list() -> Result<(), CommandError> {
    let pool = connect().await?;
    let products = ProductRepository::new(&pool).list().await?;

    if products.is_empty() {
        tracing::info!("Catalog is empty. Seed it with `chatbot-cli seed products <file>`");
        return Ok(());
    }

    tracing::info!("Catalog ({} products)", products.len());
    for product in &products {
        tracing::info!(
            "  #{} {} - Rs {} - {}",
            product.product_id,
            product.name,
            product.price,
            product.availability_status
        );
    }

    Ok(())
}
