//! Provider configuration

use crate::error::ProviderError;

/// Configuration for a CI provider
///
/// Only `url` is required; every other key is independently optional. No
/// network I/O happens anywhere in this module.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Base URL of the CI server (required, non-empty)
    pub url: String,
    /// Path to the builds resource, relative to `url`
    pub builds_path: Option<String>,
    /// Basic-auth username
    pub username: Option<String>,
    /// Basic-auth password
    pub password: Option<String>,
    /// Owner/organization name, sent as a query parameter
    pub owner_name: Option<String>,
    /// API access token, sent as a query parameter alongside `owner_name`
    pub access_token: Option<String>,
    /// HTTP proxy address
    pub http_proxyaddr: Option<String>,
    /// HTTP proxy port
    pub http_proxyport: Option<u16>,
    /// HTTP proxy username
    pub http_proxyuser: Option<String>,
    /// HTTP proxy password
    pub http_proxypass: Option<String>,
}

impl ProviderConfig {
    /// Create a configuration with only the base URL set
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Parse configuration from a TOML table
    ///
    /// Unrecognized keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Config` if `url` is missing or empty, or if
    /// `http_proxyport` is not a valid port number.
    pub fn from_toml(table: &toml::Table) -> Result<Self, ProviderError> {
        let get_str = |key: &str| {
            table
                .get(key)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };

        let url = get_str("url").unwrap_or_default();

        let http_proxyport = match table.get("http_proxyport") {
            Some(value) => {
                let port = value
                    .as_integer()
                    .and_then(|p| u16::try_from(p).ok())
                    .ok_or_else(|| ProviderError::Config {
                        message: format!("http_proxyport must be a port number, got {value}"),
                    })?;
                Some(port)
            }
            None => None,
        };

        let config = Self {
            url,
            builds_path: get_str("builds_path"),
            username: get_str("username"),
            password: get_str("password"),
            owner_name: get_str("owner_name"),
            access_token: get_str("access_token"),
            http_proxyaddr: get_str("http_proxyaddr"),
            http_proxyport,
            http_proxyuser: get_str("http_proxyuser"),
            http_proxypass: get_str("http_proxypass"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check the construction-time invariant: `url` is non-empty
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Config` if `url` is empty.
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.url.is_empty() {
            return Err(ProviderError::Config {
                message: "url is required in provider config".to_string(),
            });
        }
        Ok(())
    }
}
