//! [`reqwest`]-backed implementation of [`Remote`].

use async_trait::async_trait;
use meili_client::{MeiliError, Method, Remote, Request, Response, TransportError};
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::HttpRemoteConfig;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-Meili-API-Key";

const JSON: &str = "application/json";

/// Sends requests to a Meilisearch server over HTTP.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    inner: reqwest::Client,
    base: Url,
    api_key: Option<String>,
}

impl HttpRemote {
    /// Create a remote for the given configuration.
    ///
    /// # Errors
    ///
    /// * `TransportError::InvalidUrl` - if the configured URL cannot be parsed
    /// * `TransportError::ConnectionError` - if the HTTP client cannot be built
    pub fn new(config: HttpRemoteConfig) -> Result<Self, MeiliError> {
        let mut base = Url::parse(&config.url)
            .map_err(|e| TransportError::invalid_url(format!("{}: {e}", config.url)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder
            .build()
            .map_err(|e| TransportError::connection(e.to_string()))?;

        Ok(Self {
            inner,
            base,
            api_key: config.api_key,
        })
    }

    /// Create a remote from `MEILI_*` environment variables.
    pub fn from_env() -> Result<Self, MeiliError> {
        Self::new(HttpRemoteConfig::from_env()?)
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve a request path and query against the base URL.
    pub fn url_for(&self, request: &Request) -> Result<Url, TransportError> {
        let mut url = self
            .base
            .join(request.path().trim_start_matches('/'))
            .map_err(|e| TransportError::invalid_url(format!("{}: {e}", request.path())))?;
        if !request.query().is_empty() {
            url.query_pairs_mut().extend_pairs(request.query());
        }
        Ok(url)
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn send_error(error: reqwest::Error) -> TransportError {
    if error.is_connect() || error.is_timeout() {
        TransportError::connection(error.to_string())
    } else {
        TransportError::request(error.to_string())
    }
}

#[async_trait]
impl Remote for HttpRemote {
    #[instrument(skip(self, request), fields(method = %method, path = %request.path()))]
    async fn execute(&self, method: Method, request: Request) -> Result<Response, TransportError> {
        let url = self.url_for(&request)?;

        let mut builder = self.inner.request(to_reqwest(method), url);
        if let Some(api_key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, api_key);
        }
        if let Some(body) = request.into_body() {
            builder = builder.header(CONTENT_TYPE, JSON).body(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            send_error(e)
        })?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::body(e.to_string()))?;

        debug!(status, bytes = bytes.len(), "Received response");
        let body = (!bytes.is_empty()).then(|| bytes.to_vec());
        Ok(Response::new(status, body))
    }
}
