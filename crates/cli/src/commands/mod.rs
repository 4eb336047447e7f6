//! CLI subcommands.

pub mod migrate;
pub mod products;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use sales_chatbot_webhook::db::{self, RepositoryError};

/// Pool size for one-shot CLI commands.
const CLI_MAX_CONNECTIONS: u32 = 2;

/// Errors shared by the database-backed commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Read the database URL the webhook uses, falling back to `DATABASE_URL`.
fn database_url() -> Result<SecretString, CommandError> {
    dotenvy::dotenv().ok();

    std::env::var("WEBHOOK_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("WEBHOOK_DATABASE_URL"))
}

/// Connect to the webhook database.
async fn connect() -> Result<PgPool, CommandError> {
    let database_url = database_url()?;
    let pool = db::create_pool(&database_url, CLI_MAX_CONNECTIONS).await?;
    tracing::info!("Connected to database");
    Ok(pool)
}
