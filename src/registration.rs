//! Registration records mapping relay tokens to Naver API credentials.

use base64::Engine;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::GatewayError;

/// Number of random bytes behind each token. 18 bytes encode to exactly 24
/// URL-safe base64 characters.
const TOKEN_BYTES: usize = 18;

/// Length of a generated token in characters
pub const TOKEN_LENGTH: usize = 24;

/// A stored token and the provider credentials it resolves to.
///
/// Field names match the columns of the `users` table.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub token: String,
    pub display_name: Option<String>,
    pub naver_client_id: String,
    pub naver_client_secret: String,
}

impl Registration {
    /// Provider credentials carried by this registration
    pub fn credentials(&self) -> ProviderCredentials {
        ProviderCredentials {
            client_id: self.naver_client_id.clone(),
            client_secret: self.naver_client_secret.clone(),
        }
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("token", &redact(&self.token))
            .field("display_name", &self.display_name)
            .field("naver_client_id", &self.naver_client_id)
            .finish_non_exhaustive()
    }
}

/// Client id and secret sent to the search provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// Body of `POST /register`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub naver_client_id: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar")]
    pub naver_client_secret: Option<String>,
}

impl RegisterRequest {
    /// Check required credentials and mint a new registration.
    ///
    /// Empty strings are treated the same as absent fields.
    pub fn into_registration(self) -> Result<Registration, GatewayError> {
        let naver_client_id = non_empty(self.naver_client_id);
        let naver_client_secret = non_empty(self.naver_client_secret);

        let (Some(naver_client_id), Some(naver_client_secret)) =
            (naver_client_id, naver_client_secret)
        else {
            return Err(GatewayError::MissingCredentials);
        };

        Ok(Registration {
            token: generate_token(),
            display_name: non_empty(self.display_name),
            naver_client_id,
            naver_client_secret,
        })
    }
}

/// Response body of `POST /register`
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub mcp_url: String,
    pub token: String,
}

/// Generate a random URL-safe relay token
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill(&mut bytes[..]);
    base64::prelude::BASE64_URL_SAFE_NO_PAD.encode(bytes)
}

/// Build the relay URL for a token under the given scheme and host.
pub fn build_mcp_url(base: &str, token: &str) -> String {
    format!("{}/mcp/{}", base.trim_end_matches('/'), token)
}

/// Shorten a token for log output
pub fn redact(token: &str) -> String {
    let prefix: String = token.chars().take(4).collect();
    format!("{prefix}...")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Strings as-is and other JSON scalars in their string form. Null, arrays,
/// and objects have no text.
pub(crate) fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(value) => Some(value),
        Value::Number(value) => Some(value.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        _ => None,
    }
}

fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_text))
}
