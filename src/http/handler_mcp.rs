//! Handles /mcp/{token} - resolves a relay token and forwards the query to the search provider

use axum::{
    Json,
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::Method,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{context::AppState, utils_request::parse_json_body};
use crate::{
    errors::{GatewayError, Result},
    registration::{redact, scalar_text},
};

/// JSON body accepted on every method other than GET
#[derive(Debug, Default, Deserialize)]
struct RelayBody {
    #[serde(default)]
    q: Option<Value>,
}

/// Successful relay envelope. `q` echoes the value as the client sent it.
#[derive(Debug, Serialize, Deserialize)]
pub struct RelayResponse {
    pub ok: bool,
    pub source: String,
    pub q: Value,
    pub result: Value,
}

/// A validated relay query: the text sent upstream and the value echoed back.
#[derive(Debug, PartialEq)]
struct RelayQuery {
    text: String,
    echo: Value,
}

/// First `q` in a raw query string. Repeated keys are not an error.
fn first_query_param(raw: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(raw?.as_bytes())
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
}

fn relay_query(method: &Method, raw_query: Option<&str>, body: &[u8]) -> Result<RelayQuery> {
    let echo = if *method == Method::GET {
        first_query_param(raw_query).map(Value::String)
    } else {
        let body: RelayBody = parse_json_body(body)?;
        body.q
    };

    let text = echo
        .clone()
        .and_then(scalar_text)
        .filter(|q| !q.is_empty())
        .ok_or(GatewayError::MissingQuery)?;

    Ok(RelayQuery {
        text,
        echo: echo.unwrap_or(Value::Null),
    })
}

pub async fn handle_mcp(
    State(state): State<AppState>,
    Path(token): Path<String>,
    method: Method,
    RawQuery(raw_query): RawQuery,
    body: Bytes,
) -> Result<Json<RelayResponse>> {
    let query = relay_query(&method, raw_query.as_deref(), &body)?;

    let registration = state
        .registration_store
        .get_registration(&token)
        .await?
        .ok_or(GatewayError::TokenNotFound)?;

    tracing::debug!(token = %redact(&token), %method, "relaying search query");

    let provider = &state.search_provider;
    let result = provider
        .search(&registration.credentials(), &query.text)
        .await?;

    Ok(Json(RelayResponse {
        ok: true,
        source: provider.source().to_string(),
        q: query.echo,
        result,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_relay_query_get() {
        // Body is ignored on GET
        let query = relay_query(&Method::GET, Some("q=news"), br#"{"q":"other"}"#).unwrap();
        assert_eq!(query.text, "news");
        assert_eq!(query.echo, json!("news"));

        let query = relay_query(&Method::GET, Some("q=%EA%B2%80%EC%83%89+1"), b"").unwrap();
        assert_eq!(query.text, "검색 1");

        let result = relay_query(&Method::GET, None, br#"{"q":"other"}"#);
        assert!(matches!(result, Err(GatewayError::MissingQuery)));

        let result = relay_query(&Method::GET, Some("q="), b"");
        assert!(matches!(result, Err(GatewayError::MissingQuery)));

        let result = relay_query(&Method::GET, Some("query=news"), b"");
        assert!(matches!(result, Err(GatewayError::MissingQuery)));
    }

    #[test]
    fn test_relay_query_repeated_key() {
        let query = relay_query(&Method::GET, Some("q=a&q=b"), b"").unwrap();
        assert_eq!(query.text, "a");

        let query = relay_query(&Method::POST, Some("q=a&q=b"), br#"{"q":"x"}"#).unwrap();
        assert_eq!(query.text, "x");
    }

    #[test]
    fn test_relay_query_body() {
        // Query string is ignored on other methods
        let query = relay_query(&Method::POST, Some("q=ignored"), br#"{"q":"news"}"#).unwrap();
        assert_eq!(query.text, "news");

        let query = relay_query(&Method::PUT, None, br#"{"q":2024}"#).unwrap();
        assert_eq!(query.text, "2024");
        assert_eq!(query.echo, json!(2024));

        let query = relay_query(&Method::POST, None, br#"{"q":true}"#).unwrap();
        assert_eq!(query.text, "true");
        assert_eq!(query.echo, json!(true));

        let result = relay_query(&Method::POST, Some("q=ignored"), b"");
        assert!(matches!(result, Err(GatewayError::MissingQuery)));

        let result = relay_query(&Method::POST, None, br#"{"q":null}"#);
        assert!(matches!(result, Err(GatewayError::MissingQuery)));

        let result = relay_query(&Method::POST, None, br#"{"q":["a"]}"#);
        assert!(matches!(result, Err(GatewayError::MissingQuery)));

        let result = relay_query(&Method::POST, None, b"q=news");
        assert!(matches!(result, Err(GatewayError::InvalidJson(_))));
    }
}
