//! Request helpers shared by the gateway handlers.

use axum::http::{HeaderMap, header};
use serde::de::DeserializeOwned;

use crate::errors::GatewayError;

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_HOST: &str = "x-forwarded-host";

/// Scheme and host the client used to reach this server.
///
/// A configured external base wins. Otherwise proxy headers are honoured,
/// falling back to the `Host` header over plain HTTP.
pub(crate) fn request_base(external_base: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(base) = external_base {
        return base.trim_end_matches('/').to_string();
    }

    let first_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let scheme = first_value(FORWARDED_PROTO).unwrap_or_else(|| "http".to_string());
    let host = first_value(FORWARDED_HOST)
        .or_else(|| first_value(header::HOST.as_str()))
        .unwrap_or_else(|| "localhost".to_string());

    format!("{scheme}://{host}")
}

/// Decode an optional JSON body. A blank body decodes as `T::default()`.
pub(crate) fn parse_json_body<T>(body: &[u8]) -> Result<T, GatewayError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| GatewayError::InvalidJson(e.to_string()))
}
