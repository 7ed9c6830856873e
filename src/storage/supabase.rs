//! Supabase (PostgREST) implementation for registration storage
//!
//! Talks to the `users` table through `{SUPABASE_URL}/rest/v1/users` using the
//! project's anon key.

use crate::errors::StorageError;
use crate::registration::{Registration, redact};
use crate::storage::traits::{RegistrationStore, Result};
use async_trait::async_trait;
use http::StatusCode;

const USERS_TABLE: &str = "users";
const USER_COLUMNS: &str = "token,display_name,naver_client_id,naver_client_secret";

#[derive(Clone)]
struct SupabaseEndpoint {
    table_url: String,
    anon_key: String,
}

/// Registration store backed by a Supabase project
#[derive(Clone)]
pub struct SupabaseRegistrationStore {
    http_client: reqwest::Client,
    endpoint: Option<SupabaseEndpoint>,
}

impl SupabaseRegistrationStore {
    /// Create a new Supabase registration store.
    ///
    /// Missing settings are tolerated here; every call then fails with
    /// `StorageError::NotConfigured`.
    pub fn new(
        http_client: reqwest::Client,
        supabase_url: Option<&str>,
        anon_key: Option<&str>,
    ) -> Self {
        let endpoint = match (supabase_url, anon_key) {
            (Some(url), Some(key)) => Some(SupabaseEndpoint {
                table_url: format!("{}/rest/v1/{}", url.trim_end_matches('/'), USERS_TABLE),
                anon_key: key.to_string(),
            }),
            _ => None,
        };
        Self {
            http_client,
            endpoint,
        }
    }

    fn endpoint(&self) -> Result<&SupabaseEndpoint> {
        self.endpoint.as_ref().ok_or_else(|| {
            StorageError::NotConfigured("SUPABASE_URL and SUPABASE_ANON_KEY must be set".to_string())
        })
    }

    fn request(&self, method: reqwest::Method) -> Result<reqwest::RequestBuilder> {
        let endpoint = self.endpoint()?;
        Ok(self
            .http_client
            .request(method, &endpoint.table_url)
            .header("apikey", &endpoint.anon_key)
            .bearer_auth(&endpoint.anon_key))
    }
}

async fn error_body(response: reqwest::Response) -> String {
    response.text().await.unwrap_or_default()
}

#[async_trait]
impl RegistrationStore for SupabaseRegistrationStore {
    async fn insert_registration(&self, registration: &Registration) -> Result<()> {
        let response = self
            .request(reqwest::Method::POST)?
            .header("Prefer", "return=minimal")
            .json(&[registration])
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::CONFLICT => {
                tracing::warn!(token = %redact(&registration.token), "token collision on insert");
                Err(StorageError::DuplicateToken)
            }
            status => Err(StorageError::QueryFailed(format!(
                "insert into {} returned {}: {}",
                USERS_TABLE,
                status,
                error_body(response).await
            ))),
        }
    }

    async fn get_registration(&self, token: &str) -> Result<Option<Registration>> {
        let token_filter = format!("eq.{}", token);
        let response = self
            .request(reqwest::Method::GET)?
            .query(&[
                ("select", USER_COLUMNS),
                ("token", token_filter.as_str()),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::QueryFailed(format!(
                "select from {} returned {}: {}",
                USERS_TABLE,
                status,
                error_body(response).await
            )));
        }

        let rows: Vec<Registration> = response
            .json()
            .await
            .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;

        Ok(rows.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_store_fails() {
        let store = SupabaseRegistrationStore::new(reqwest::Client::new(), None, Some("key"));

        let result = store.get_registration("tok-1").await;
        assert!(matches!(result, Err(StorageError::NotConfigured(_))));

        let registration = Registration {
            token: "tok-1".to_string(),
            display_name: None,
            naver_client_id: "id1".to_string(),
            naver_client_secret: "sec1".to_string(),
        };
        let result = store.insert_registration(&registration).await;
        assert!(matches!(result, Err(StorageError::NotConfigured(_))));
    }

    #[test]
    fn test_table_url() {
        let store = SupabaseRegistrationStore::new(
            reqwest::Client::new(),
            Some("https://project.supabase.co/"),
            Some("key"),
        );
        let endpoint = store.endpoint().unwrap();
        assert_eq!(
            endpoint.table_url,
            "https://project.supabase.co/rest/v1/users"
        );
    }
}
