//! Trait-based registration storage with Supabase, in-memory, SQLite, and PostgreSQL backends.

pub mod inmemory;
pub mod supabase;
pub mod traits;

// Feature-gated storage implementations
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

// Re-export commonly used types and traits
pub use inmemory::MemoryRegistrationStore;
pub use supabase::SupabaseRegistrationStore;
pub use traits::*;

#[cfg(feature = "postgres")]
pub use postgres::PostgresRegistrationStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRegistrationStore;

use crate::config::Config;
use crate::errors::StorageError;
use std::sync::Arc;

/// Storage backend configuration and factory
#[derive(Clone, Debug)]
pub enum StorageBackend {
    Memory,
    Supabase {
        url: Option<String>,
        anon_key: Option<String>,
    },
    #[cfg(feature = "sqlite")]
    Sqlite(String), // Connection string/path
    #[cfg(feature = "postgres")]
    Postgres(String), // Connection string
}

/// Create a storage backend based on configuration
pub async fn create_storage_backend(
    backend: StorageBackend,
    http_client: reqwest::Client,
) -> std::result::Result<Arc<dyn RegistrationStore>, StorageError> {
    match backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryRegistrationStore::new())),
        StorageBackend::Supabase { url, anon_key } => Ok(Arc::new(
            SupabaseRegistrationStore::new(http_client, url.as_deref(), anon_key.as_deref()),
        )),
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite(database_url) => {
            let pool = sqlx::SqlitePool::connect(&database_url)
                .await
                .map_err(|e| {
                    StorageError::ConnectionFailed(format!("SQLite connection failed: {}", e))
                })?;

            let storage = sqlite::SqliteRegistrationStore::new(pool);

            // Run migrations
            storage.migrate().await?;

            Ok(Arc::new(storage))
        }
        #[cfg(feature = "postgres")]
        StorageBackend::Postgres(database_url) => {
            let pool = sqlx::postgres::PgPool::connect(&database_url)
                .await
                .map_err(|e| {
                    StorageError::ConnectionFailed(format!("PostgreSQL connection failed: {}", e))
                })?;

            let storage = postgres::PostgresRegistrationStore::new(pool);

            // Run migrations
            storage.migrate().await?;

            Ok(Arc::new(storage))
        }
    }
}

/// Parse storage backend from configuration
pub fn parse_storage_backend(
    config: &Config,
) -> std::result::Result<StorageBackend, StorageError> {
    match config.storage_backend.as_str() {
        "memory" => Ok(StorageBackend::Memory),
        "supabase" => Ok(StorageBackend::Supabase {
            url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
        }),
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let url = config.database_url.as_deref().unwrap_or("sqlite:mcp-gateway.db?mode=rwc");
            Ok(StorageBackend::Sqlite(url.to_string()))
        }
        #[cfg(feature = "postgres")]
        "postgres" => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                StorageError::InvalidBackend(
                    "DATABASE_URL required for postgres backend".to_string(),
                )
            })?;
            Ok(StorageBackend::Postgres(url.to_string()))
        }
        other => Err(StorageError::InvalidBackend(format!(
            "Unknown storage backend: {}",
            other
        ))),
    }
}
