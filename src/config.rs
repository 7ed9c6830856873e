//! Environment-based configuration types for the gateway runtime settings.

use anyhow::Result;
use std::time::Duration;

use crate::errors::ConfigError;

/// Default Naver search endpoint queried by the relay.
pub const DEFAULT_NAVER_SEARCH_URL: &str = "https://openapi.naver.com/v1/search/news.json";

/// Placeholder value used when SERVER_SECRET is not set.
pub const DEFAULT_SERVER_SECRET: &str = "change_me";

/// HTTP server port configuration
#[derive(Clone, Debug)]
pub struct HttpPort(u16);

/// HTTP client timeout configuration
#[derive(Clone, Debug)]
pub struct HttpClientTimeout(Duration);

/// Timeout applied to each outbound search request
#[derive(Clone, Debug)]
pub struct SearchTimeout(Duration);

/// Number of results requested from the search provider
#[derive(Clone, Debug)]
pub struct SearchDisplay(u32);

/// Search provider endpoint
#[derive(Clone, Debug)]
pub struct SearchUrl(String);

/// Public scheme and host used when building relay URLs
#[derive(Clone, Debug, Default)]
pub struct ExternalBase(Option<String>);

/// Server secret. Loaded for deployment parity; no handler reads it.
#[derive(Clone)]
pub struct ServerSecret(String);

/// Main application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub version: String,
    pub http_port: HttpPort,
    pub external_base: ExternalBase,
    pub user_agent: String,
    pub http_client_timeout: HttpClientTimeout,
    pub storage_backend: String,
    pub database_url: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub server_secret: ServerSecret,
    pub naver_search_url: SearchUrl,
    pub naver_search_display: SearchDisplay,
    pub search_timeout: SearchTimeout,
}

impl Config {
    /// Create a new configuration from environment variables
    pub fn new() -> Result<Self> {
        let default_user_agent = format!("mcp-gateway/{}", version()?);
        let http_port: HttpPort = default_env("PORT", "3000").try_into()?;
        let external_base: ExternalBase = optional_env("EXTERNAL_BASE").try_into()?;
        let user_agent = default_env("USER_AGENT", &default_user_agent);
        let http_client_timeout: HttpClientTimeout =
            default_env("HTTP_CLIENT_TIMEOUT", "10s").try_into()?;
        let storage_backend = default_env("STORAGE_BACKEND", "supabase");
        let database_url = optional_env("DATABASE_URL");
        let supabase_url = optional_env("SUPABASE_URL").filter(|v| !v.is_empty());
        let supabase_anon_key = optional_env("SUPABASE_ANON_KEY").filter(|v| !v.is_empty());
        let server_secret: ServerSecret = optional_env("SERVER_SECRET").into();
        let naver_search_url: SearchUrl =
            default_env("NAVER_SEARCH_URL", DEFAULT_NAVER_SEARCH_URL).try_into()?;
        let naver_search_display: SearchDisplay =
            default_env("NAVER_SEARCH_DISPLAY", "5").try_into()?;
        let search_timeout: SearchTimeout = default_env("SEARCH_TIMEOUT", "8s").try_into()?;

        if supabase_url.is_none() || supabase_anon_key.is_none() {
            tracing::warn!(
                "Supabase not configured. Set SUPABASE_URL and SUPABASE_ANON_KEY in environment."
            );
        }

        if server_secret.is_default() {
            tracing::warn!("SERVER_SECRET is not set, using the default placeholder");
        }

        Ok(Self {
            version: version()?,
            http_port,
            external_base,
            user_agent,
            http_client_timeout,
            storage_backend,
            database_url,
            supabase_url,
            supabase_anon_key,
            server_secret,
            naver_search_url,
            naver_search_display,
            search_timeout,
        })
    }
}

/// Get application version from build environment
pub fn version() -> Result<String> {
    option_env!("GIT_HASH")
        .or(option_env!("CARGO_PKG_VERSION"))
        .map(|val| val.to_string())
        .ok_or(ConfigError::VersionNotSet.into())
}

pub(crate) fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn default_env(name: &str, default_value: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default_value.to_string())
}

fn parse_duration(value: String) -> Result<Duration, ConfigError> {
    duration_str::parse(&value).map_err(|e| ConfigError::DurationParsingFailed(value, e.to_string()))
}

impl TryFrom<String> for HttpPort {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Ok(Self(3000))
        } else {
            value
                .parse::<u16>()
                .map(Self)
                .map_err(|err| ConfigError::PortParsingFailed(err).into())
        }
    }
}

impl AsRef<u16> for HttpPort {
    fn as_ref(&self) -> &u16 {
        &self.0
    }
}

impl TryFrom<String> for HttpClientTimeout {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Ok(Self(Duration::from_secs(10)));
        }
        parse_duration(value).map(Self)
    }
}

impl AsRef<Duration> for HttpClientTimeout {
    fn as_ref(&self) -> &Duration {
        &self.0
    }
}

impl TryFrom<String> for SearchTimeout {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Ok(Self(Duration::from_secs(8)));
        }
        parse_duration(value).map(Self)
    }
}

impl AsRef<Duration> for SearchTimeout {
    fn as_ref(&self) -> &Duration {
        &self.0
    }
}

impl TryFrom<String> for SearchDisplay {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Ok(Self(5));
        }
        value
            .trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|e| ConfigError::IntegerParsingFailed("NAVER_SEARCH_DISPLAY", value, e))
    }
}

impl AsRef<u32> for SearchDisplay {
    fn as_ref(&self) -> &u32 {
        &self.0
    }
}

impl TryFrom<String> for SearchUrl {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        url::Url::parse(&value)
            .map_err(|e| ConfigError::UrlParsingFailed("NAVER_SEARCH_URL", value.clone(), e))?;
        Ok(Self(value))
    }
}

impl AsRef<String> for SearchUrl {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

impl TryFrom<Option<String>> for ExternalBase {
    type Error = ConfigError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        match value.filter(|s| !s.trim().is_empty()) {
            None => Ok(Self(None)),
            Some(value) => {
                url::Url::parse(&value).map_err(|e| {
                    ConfigError::UrlParsingFailed("EXTERNAL_BASE", value.clone(), e)
                })?;
                Ok(Self(Some(value.trim_end_matches('/').to_string())))
            }
        }
    }
}

impl AsRef<Option<String>> for ExternalBase {
    fn as_ref(&self) -> &Option<String> {
        &self.0
    }
}

impl From<Option<String>> for ServerSecret {
    fn from(value: Option<String>) -> Self {
        Self(
            value
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SERVER_SECRET.to_string()),
        )
    }
}

impl ServerSecret {
    /// Whether the secret is still the built-in placeholder
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_SERVER_SECRET
    }
}

impl AsRef<String> for ServerSecret {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

impl std::fmt::Debug for ServerSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ServerSecret(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_port() {
        let port: HttpPort = "".to_string().try_into().unwrap();
        assert_eq!(*port.as_ref(), 3000);

        let port: HttpPort = "8081".to_string().try_into().unwrap();
        assert_eq!(*port.as_ref(), 8081);

        let invalid: Result<HttpPort, _> = "not-a-port".to_string().try_into();
        assert!(invalid.is_err());
    }

    #[test]
    fn test_search_timeout() {
        let timeout: SearchTimeout = "".to_string().try_into().unwrap();
        assert_eq!(*timeout.as_ref(), Duration::from_secs(8));

        let timeout: SearchTimeout = "500ms".to_string().try_into().unwrap();
        assert_eq!(*timeout.as_ref(), Duration::from_millis(500));

        let timeout: SearchTimeout = "2m".to_string().try_into().unwrap();
        assert_eq!(*timeout.as_ref(), Duration::from_secs(120));

        let invalid: Result<SearchTimeout, _> = "soon".to_string().try_into();
        assert!(matches!(
            invalid,
            Err(ConfigError::DurationParsingFailed(_, _))
        ));
    }

    #[test]
    fn test_search_display() {
        let display: SearchDisplay = "".to_string().try_into().unwrap();
        assert_eq!(*display.as_ref(), 5);

        let display: SearchDisplay = "20".to_string().try_into().unwrap();
        assert_eq!(*display.as_ref(), 20);

        let invalid: Result<SearchDisplay, _> = "-1".to_string().try_into();
        assert!(invalid.is_err());
    }

    #[test]
    fn test_external_base() {
        let base: ExternalBase = None::<String>.try_into().unwrap();
        assert!(base.as_ref().is_none());

        let base: ExternalBase = Some("".to_string()).try_into().unwrap();
        assert!(base.as_ref().is_none());

        let base: ExternalBase = Some("https://relay.example.com/".to_string())
            .try_into()
            .unwrap();
        assert_eq!(base.as_ref().as_deref(), Some("https://relay.example.com"));

        let invalid: Result<ExternalBase, _> = Some("relay.example.com".to_string()).try_into();
        assert!(invalid.is_err());
    }

    #[test]
    fn test_search_url() {
        let url: SearchUrl = DEFAULT_NAVER_SEARCH_URL.to_string().try_into().unwrap();
        assert_eq!(url.as_ref(), DEFAULT_NAVER_SEARCH_URL);

        let invalid: Result<SearchUrl, _> = "openapi.naver.com".to_string().try_into();
        assert!(invalid.is_err());
    }

    #[test]
    fn test_server_secret() {
        let secret: ServerSecret = None::<String>.into();
        assert!(secret.is_default());
        assert_eq!(secret.as_ref(), "change_me");

        let secret: ServerSecret = Some("".to_string()).into();
        assert!(secret.is_default());

        let secret: ServerSecret = Some("s3cret".to_string()).into();
        assert!(!secret.is_default());
        assert_eq!(format!("{:?}", secret), "ServerSecret(..)");
    }
}
