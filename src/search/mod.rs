//! Outbound search providers invoked by the relay endpoint.

use async_trait::async_trait;

use crate::errors::SearchError;
use crate::registration::ProviderCredentials;

pub mod naver;

pub use naver::NaverSearchProvider;

/// Trait for search providers.
///
/// Implementations forward a query using caller-owned credentials and return
/// the provider's response body untouched.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Label reported as `source` in relay responses
    fn source(&self) -> &'static str;

    /// Run a search with the given credentials.
    ///
    /// # Errors
    /// - `SearchError::Timeout` - No response within the configured timeout
    /// - `SearchError::Transport` - Connection or protocol failure
    /// - `SearchError::ProviderStatus` - Provider answered with a non-success status
    async fn search(
        &self,
        credentials: &ProviderCredentials,
        query: &str,
    ) -> Result<serde_json::Value, SearchError>;
}
