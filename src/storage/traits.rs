//! Storage trait definitions for relay registrations.

use crate::errors::StorageError;
use crate::registration::Registration;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Trait for storing and resolving registrations by token
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Persist a new registration. Fails with `DuplicateToken` if the token is taken.
    async fn insert_registration(&self, registration: &Registration) -> Result<()>;

    /// Look up a registration by exact token match
    async fn get_registration(&self, token: &str) -> Result<Option<Registration>>;
}
