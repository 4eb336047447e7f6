//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! chatbot-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `WEBHOOK_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//!
//! Migrations are embedded from `crates/webhook/migrations/`, so the binary
//! applies exactly the schema the webhook was built against.

use sales_chatbot_webhook::db;

use super::{CommandError, connect};

/// Apply all pending webhook migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails,
/// or a migration fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!(
        available = db::MIGRATOR.iter().count(),
        "Running webhook migrations..."
    );
    db::run_migrations(&pool).await?;

    tracing::info!("Webhook migrations complete!");
    Ok(())
}
