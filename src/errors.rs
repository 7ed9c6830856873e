//! Standardized error types following the `error-gateway-<domain>-<number>` format.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde_json::json;
use thiserror::Error;

/// Configuration errors that occur during application startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error when PORT cannot be parsed
    #[error("error-gateway-config-1 Parsing PORT into u16 failed: {0:?}")]
    PortParsingFailed(std::num::ParseIntError),

    /// Error when version information is not available
    #[error("error-gateway-config-2 One of GIT_HASH or CARGO_PKG_VERSION must be set")]
    VersionNotSet,

    /// Error when a duration string cannot be parsed
    #[error("error-gateway-config-3 Failed to parse duration '{0}': {1}")]
    DurationParsingFailed(String, String),

    /// Error when an integer setting cannot be parsed
    #[error("error-gateway-config-4 Failed to parse {0} '{1}': {2}")]
    IntegerParsingFailed(&'static str, String, std::num::ParseIntError),

    /// Error when a URL setting cannot be parsed
    #[error("error-gateway-config-5 Failed to parse {0} '{1}': {2}")]
    UrlParsingFailed(&'static str, String, url::ParseError),
}

/// Registration store errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The external store has no endpoint or credentials configured
    #[error("error-gateway-storage-1 Store not configured: {0}")]
    NotConfigured(String),

    /// Error when the store connection fails
    #[error("error-gateway-storage-2 Store connection failed: {0}")]
    ConnectionFailed(String),

    /// Error when the store rejects or fails a query
    #[error("error-gateway-storage-3 Query execution failed: {0}")]
    QueryFailed(String),

    /// Error when a stored row cannot be decoded
    #[error("error-gateway-storage-4 Data serialization failed: {0}")]
    SerializationFailed(String),

    /// A registration with the same token already exists
    #[error("error-gateway-storage-5 Duplicate token")]
    DuplicateToken,

    /// Error when the storage backend name is invalid
    #[error("error-gateway-storage-6 Invalid storage backend: {0}")]
    InvalidBackend(String),
}

/// Outbound search provider errors
#[derive(Debug, Error)]
pub enum SearchError {
    /// The provider did not answer within the configured timeout
    #[error("error-gateway-search-1 Search request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The request never produced a response
    #[error("error-gateway-search-2 Search request failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status
    #[error("error-gateway-search-3 Provider returned status {status}: {detail}")]
    ProviderStatus { status: u16, detail: String },

    /// A success response could not be read
    #[error("error-gateway-search-4 Failed to read provider response: {0}")]
    InvalidResponse(String),
}

impl SearchError {
    /// Detail string surfaced to clients of the relay endpoint.
    pub fn detail(&self) -> String {
        match self {
            SearchError::Timeout(duration) => {
                format!("timeout of {}ms exceeded", duration.as_millis())
            }
            SearchError::Transport(message) => message.clone(),
            SearchError::ProviderStatus { detail, .. } => detail.clone(),
            SearchError::InvalidResponse(message) => message.clone(),
        }
    }
}

/// Errors returned by the gateway HTTP handlers.
///
/// Each variant maps to a fixed JSON body with an `error` key. Store internals
/// are logged and never included in the response.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Required registration credentials are missing
    #[error("error-gateway-http-1 naverClientId and naverClientSecret required")]
    MissingCredentials,

    /// The relay query string is missing
    #[error("error-gateway-http-2 query q is required")]
    MissingQuery,

    /// The request body is not valid JSON
    #[error("error-gateway-http-3 Invalid JSON body: {0}")]
    InvalidJson(String),

    /// No registration exists for the token
    #[error("error-gateway-http-4 Token not found")]
    TokenNotFound,

    /// The registration store failed
    #[error("error-gateway-http-5 Storage failure: {0}")]
    Storage(#[from] StorageError),

    /// The search provider call failed
    #[error("error-gateway-http-6 Relay failure: {0}")]
    Relay(#[from] SearchError),

    /// Any other failure while handling the request
    #[error("error-gateway-http-7 Request processing failed: {0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingCredentials
            | GatewayError::MissingQuery
            | GatewayError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            GatewayError::TokenNotFound => StatusCode::NOT_FOUND,
            GatewayError::Storage(_) | GatewayError::Relay(_) | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            GatewayError::MissingCredentials => {
                json!({ "error": "naverClientId and naverClientSecret required" })
            }
            GatewayError::MissingQuery => json!({ "error": "query q is required" }),
            GatewayError::InvalidJson(_) => json!({ "error": "invalid_json" }),
            GatewayError::TokenNotFound => json!({ "error": "token_not_found" }),
            GatewayError::Storage(_) => json!({ "error": "db_error" }),
            GatewayError::Relay(err) => json!({
                "error": "mcp_server_error",
                "detail": err.detail(),
            }),
            GatewayError::Internal(_) => json!({ "error": "server_error" }),
        };

        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
