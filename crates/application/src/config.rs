//! Postman connection settings.

use std::fmt;

use thiserror::Error;
use url::Url;

/// Setting holding the Postman API base URL.
pub const API_URL_KEY: &str = "postman_api_url";

/// Setting holding the Postman API key.
pub const API_KEY_KEY: &str = "postman_api_key";

/// Configuration errors, detected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required setting is absent or blank.
    #[error("missing required setting `{0}`")]
    Missing(&'static str),

    /// The API URL is not an absolute http(s) URL.
    #[error("invalid postman_api_url `{url}`: {reason}")]
    InvalidUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Immutable connection settings for the Postman API.
#[derive(Clone, PartialEq, Eq)]
pub struct PostmanConfig {
    api_url: String,
    api_key: String,
}

impl PostmanConfig {
    /// Validates and builds a configuration.
    ///
    /// The URL must be absolute http(s); a trailing slash is removed so
    /// endpoint paths can be appended directly.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value is blank or the URL is invalid.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let api_url = api_url.into().trim().trim_end_matches('/').to_string();
        let api_key = api_key.into().trim().to_string();

        if api_url.is_empty() {
            return Err(ConfigError::Missing(API_URL_KEY));
        }
        if api_key.is_empty() {
            return Err(ConfigError::Missing(API_KEY_KEY));
        }

        let parsed = Url::parse(&api_url).map_err(|e| ConfigError::InvalidUrl {
            url: api_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: api_url,
                reason: format!("unsupported scheme `{}`", parsed.scheme()),
            });
        }

        Ok(Self { api_url, api_key })
    }

    /// Builds a configuration from a key lookup, such as the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a setting is missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_KEY).ok_or(ConfigError::Missing(API_URL_KEY))?;
        let api_key = lookup(API_KEY_KEY).ok_or(ConfigError::Missing(API_KEY_KEY))?;
        Self::new(api_url, api_key)
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// API key sent with every request.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for PostmanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostmanConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
