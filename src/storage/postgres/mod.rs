//! PostgreSQL storage implementations
//!
//! Uses the same `users` table layout as the hosted Supabase project, so a
//! self-managed PostgreSQL database can stand in for it.

mod registrations;

use crate::errors::StorageError;
use sqlx::postgres::PgPool;

pub use registrations::PostgresRegistrationStore;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Run database migrations
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .map_err(|e| StorageError::QueryFailed(format!("Migration failed: {}", e)))?;
    Ok(())
}
