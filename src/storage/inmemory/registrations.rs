//! In-memory registration storage

use crate::errors::StorageError;
use crate::registration::Registration;
use crate::storage::traits::{RegistrationStore, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Mutex;

/// In-memory registration store (for testing/development)
#[derive(Default)]
pub struct MemoryRegistrationStore {
    registrations: Mutex<HashMap<String, Registration>>,
}

impl MemoryRegistrationStore {
    /// Create a new memory registration store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored registrations
    pub fn len(&self) -> usize {
        self.registrations.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether no registrations are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RegistrationStore for MemoryRegistrationStore {
    async fn insert_registration(&self, registration: &Registration) -> Result<()> {
        let mut registrations = self.registrations.lock().map_err(|e| {
            StorageError::QueryFailed(format!("Failed to acquire registration store lock: {}", e))
        })?;

        match registrations.entry(registration.token.clone()) {
            Entry::Occupied(_) => Err(StorageError::DuplicateToken),
            Entry::Vacant(entry) => {
                entry.insert(registration.clone());
                Ok(())
            }
        }
    }

    async fn get_registration(&self, token: &str) -> Result<Option<Registration>> {
        let registrations = self.registrations.lock().map_err(|e| {
            StorageError::QueryFailed(format!("Failed to acquire registration store lock: {}", e))
        })?;

        Ok(registrations.get(token).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(token: &str) -> Registration {
        Registration {
            token: token.to_string(),
            display_name: Some("Riley".to_string()),
            naver_client_id: "id1".to_string(),
            naver_client_secret: "sec1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryRegistrationStore::new();
        assert!(store.is_empty());

        store.insert_registration(&registration("tok-1")).await.unwrap();
        assert_eq!(store.len(), 1);

        let found = store.get_registration("tok-1").await.unwrap();
        assert_eq!(found, Some(registration("tok-1")));
    }

    #[tokio::test]
    async fn test_get_is_exact_match() {
        let store = MemoryRegistrationStore::new();
        store.insert_registration(&registration("tok-1")).await.unwrap();

        assert!(store.get_registration("tok").await.unwrap().is_none());
        assert!(store.get_registration("TOK-1").await.unwrap().is_none());
        assert!(store.get_registration("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_token_rejected() {
        let store = MemoryRegistrationStore::new();
        store.insert_registration(&registration("tok-1")).await.unwrap();

        let mut other = registration("tok-1");
        other.naver_client_id = "id2".to_string();
        let result = store.insert_registration(&other).await;
        assert!(matches!(result, Err(StorageError::DuplicateToken)));

        // Original row is untouched
        let found = store.get_registration("tok-1").await.unwrap().unwrap();
        assert_eq!(found.naver_client_id, "id1");
    }
}
