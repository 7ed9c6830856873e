//! Application state shared by all request handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::search::SearchProvider;
use crate::storage::traits::RegistrationStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Registration storage, bound once at startup
    pub registration_store: Arc<dyn RegistrationStore>,
    /// Outbound search provider used by the relay endpoint
    pub search_provider: Arc<dyn SearchProvider>,
}
