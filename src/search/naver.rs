//! Naver Open API search client.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use super::SearchProvider;
use crate::errors::SearchError;
use crate::registration::ProviderCredentials;

pub const CLIENT_ID_HEADER: &str = "X-Naver-Client-Id";
pub const CLIENT_SECRET_HEADER: &str = "X-Naver-Client-Secret";

/// Search provider for the Naver search API.
#[derive(Clone, Debug)]
pub struct NaverSearchProvider {
    http_client: reqwest::Client,
    endpoint: String,
    display: u32,
    timeout: Duration,
}

impl NaverSearchProvider {
    pub fn new(
        http_client: reqwest::Client,
        endpoint: impl Into<String>,
        display: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            display,
            timeout,
        }
    }

    fn map_send_error(&self, err: reqwest::Error) -> SearchError {
        if err.is_timeout() {
            SearchError::Timeout(self.timeout)
        } else {
            SearchError::Transport(err.to_string())
        }
    }
}

/// Pull the most useful message out of a failed provider response.
///
/// Naver reports failures as `{"errorMessage": "...", "errorCode": "..."}`.
fn error_detail(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("errorMessage").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    if body.trim().is_empty() {
        format!("Request failed with status code {}", status)
    } else {
        body.to_string()
    }
}

#[async_trait]
impl SearchProvider for NaverSearchProvider {
    fn source(&self) -> &'static str {
        "naver"
    }

    async fn search(
        &self,
        credentials: &ProviderCredentials,
        query: &str,
    ) -> Result<Value, SearchError> {
        let display = self.display.to_string();
        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("query", query), ("display", display.as_str())])
            .header(CLIENT_ID_HEADER, &credentials.client_id)
            .header(CLIENT_SECRET_HEADER, &credentials.client_secret)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout(self.timeout)
            } else {
                SearchError::InvalidResponse(e.to_string())
            }
        })?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "search provider returned an error");
            return Err(SearchError::ProviderStatus {
                status: status.as_u16(),
                detail: error_detail(status.as_u16(), &body),
            });
        }

        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}
