//! PostgreSQL implementation for registration storage

use crate::errors::StorageError;
use crate::registration::Registration;
use crate::storage::traits::{RegistrationStore, Result};
use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgRow};

/// PostgreSQL implementation of registration storage
pub struct PostgresRegistrationStore {
    pool: PgPool,
}

impl PostgresRegistrationStore {
    /// Create a new PostgreSQL registration store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run migrations for the `users` table
    pub async fn migrate(&self) -> Result<()> {
        super::migrate(&self.pool).await
    }

    fn row_to_registration(row: &PgRow) -> Result<Registration> {
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
impl RegistrationStore for PostgresRegistrationStore {
    async fn insert_registration(&self, registration: &Registration) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (token, display_name, naver_client_id, naver_client_secret)
            VALUES ($1, $2, $3, $4)
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
            FROM users WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::QueryFailed(e.to_string()))?;

        row.as_ref().map(Self::row_to_registration).transpose()
    }
}
