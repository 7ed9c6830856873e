//! SQLite implementation for registration storage

use crate::errors::StorageError;
use crate::registration::Registration;
use crate::storage::traits::{RegistrationStore, Result};
use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqliteRow};

/// SQLite implementation of registration storage
pub struct SqliteRegistrationStore {
    pool: SqlitePool,
}

impl SqliteRegistrationStore {
    /// Create a new SQLite registration store
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run migrations for the `users` table
    pub async fn migrate(&self) -> Result<()> {
        super::migrate(&self.pool).await
    }

    fn row_to_registration(row: &SqliteRow) -> Result<Registration> {
        Ok(Registration {
            token: row
                .try_get("token")
                .map_err(|e| StorageError::SerializationFailed(format!("Failed to get token: {}", e)))?,
            display_name: row.try_get("display_name").map_err(|e| {
                StorageError::SerializationFailed(format!("Failed to get display_name: {}", e))
            })?,
            naver_client_id: row.try_get("naver_client_id").map_err(|e| {
                StorageError::SerializationFailed(format!("Failed to get naver_client_id: {}", e))
            })?,
            naver_client_secret: row.try_get("naver_client_secret").map_err(|e| {
                StorageError::SerializationFailed(format!(
                    "Failed to get naver_client_secret: {}",
                    e
                ))
            })?,
        })
    }
}

fn map_insert_error(err: sqlx::Error) -> StorageError {
    match err.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => StorageError::DuplicateToken,
        _ => StorageError::QueryFailed(err.to_string()),
    }
}

#[async_trait]
impl RegistrationStore for SqliteRegistrationStore {
    async fn insert_registration(&self, registration: &Registration) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (token, display_name, naver_client_id, naver_client_secret)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&registration.token)
        .bind(&registration.display_name)
        .bind(&registration.naver_client_id)
        .bind(&registration.naver_client_secret)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn get_registration(&self, token: &str) -> Result<Option<Registration>> {
        let row = sqlx::query(
            r#"
            SELECT token, display_name, naver_client_id, naver_client_secret
            FROM users WHERE token = ?1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::QueryFailed(e.to_string()))?;

        row.as_ref().map(Self::row_to_registration).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> SqliteRegistrationStore {
        // A single connection keeps the in-memory database alive and shared
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = SqliteRegistrationStore::new(pool);
        store.migrate().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = store().await;
        let registration = Registration {
            token: "tok-1".to_string(),
            display_name: None,
            naver_client_id: "id1".to_string(),
            naver_client_secret: "sec1".to_string(),
        };

        store.insert_registration(&registration).await.unwrap();
        let found = store.get_registration("tok-1").await.unwrap();
        assert_eq!(found, Some(registration.clone()));

        assert!(store.get_registration("tok-2").await.unwrap().is_none());

        let result = store.insert_registration(&registration).await;
        assert!(matches!(result, Err(StorageError::DuplicateToken)));
    }
}
