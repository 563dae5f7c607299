//! Connection settings for [`HttpRemote`](crate::HttpRemote).

use std::env;
use std::time::Duration;

use meili_client::MeiliError;
use tracing::info;

/// Default Meilisearch URL.
pub const DEFAULT_MEILI_URL: &str = "http://localhost:7700";

/// Where and how to reach a Meilisearch server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRemoteConfig {
    /// Base URL of the server. Request paths are resolved against it.
    pub url: String,
    /// Sent as `X-Meili-API-Key` when set.
    pub api_key: Option<String>,
    /// Total time allowed for one request, connect included.
    pub timeout: Option<Duration>,
}

impl Default for HttpRemoteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MEILI_URL)
    }
}

impl HttpRemoteConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            timeout: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MEILI_URL`: server URL (default: http://localhost:7700)
    /// - `MEILI_API_KEY`: API key (default: none)
    /// - `MEILI_TIMEOUT_SECS`: request timeout in seconds (default: none)
    ///
    /// # Returns
    ///
    /// * `Ok(HttpRemoteConfig)` - The resolved configuration
    /// * `Err(MeiliError)` - If `MEILI_TIMEOUT_SECS` is not a whole number
    pub fn from_env() -> Result<Self, MeiliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, MeiliError> {
        let url = lookup("MEILI_URL").unwrap_or_else(|| DEFAULT_MEILI_URL.to_string());
        let api_key = lookup("MEILI_API_KEY").filter(|key| !key.is_empty());
        let timeout = lookup("MEILI_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                    MeiliError::configuration(format!("MEILI_TIMEOUT_SECS is not a number: {raw}"))
                })
            })
            .transpose()?;

        info!(
            meili_url = %url,
            api_key_set = api_key.is_some(),
            timeout_secs = timeout.map(|t| t.as_secs()),
            "Loaded Meilisearch connection settings"
        );

        Ok(Self {
            url,
            api_key,
            timeout,
        })
    }
}
