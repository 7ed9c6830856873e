//! SQLite storage implementations
//!
//! Suitable for single-instance deployments and development.

mod registrations;

use crate::errors::StorageError;
use sqlx::sqlite::SqlitePool;

pub use registrations::SqliteRegistrationStore;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Run database migrations
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .map_err(|e| StorageError::QueryFailed(format!("Migration failed: {}", e)))?;
    Ok(())
}
