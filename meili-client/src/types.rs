//! Request and response types exchanged with a [`Remote`](crate::interfaces::Remote).
//!
//! Both are plain values: a [`Request`] is built once and handed to the
//! transport, a [`Response`] is owned by whoever received it and is released
//! when dropped.

use std::collections::BTreeMap;

/// A single REST API call.
///
/// Requests are assembled with the `with_*` methods and never change once
/// handed to a transport.
///
/// # Example
///
/// ```
/// use meili_client::Request;
///
/// let request = Request::new("/indexes/movies/search")
///     .with_query("q", "batman")
///     .with_query("limit", "5");
///
/// assert_eq!(request.path(), "/indexes/movies/search");
/// assert_eq!(request.query().get("q").map(String::as_str), Some("batman"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Request {
    path: String,
    query: BTreeMap<String, String>,
    body: Option<Vec<u8>>,
}

impl Request {
    /// Create a request for the given path with no query and no body.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: BTreeMap::new(),
            body: None,
        }
    }

    /// Add a single query parameter, replacing any previous value for the key.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add every parameter of the given map.
    pub fn with_queries<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Attach a request body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// The request path, relative to the server root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query parameters.
    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// The request body, if any.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Consume the request and return its body.
    pub fn into_body(self) -> Option<Vec<u8>> {
        self.body
    }
}

/// A single REST API response.
///
/// The response owns its body. Dropping the response releases it, so every
/// exit path of the code holding it gives the buffer back exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    body: Option<Vec<u8>>,
}

impl Response {
    /// Create a response with the given status and body.
    pub fn new(status: u16, body: Option<Vec<u8>>) -> Self {
        Self { status, body }
    }

    /// Create a response with a status and no body.
    pub fn empty(status: u16) -> Self {
        Self::new(status, None)
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The response body, if any.
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Consume the response and take ownership of its body.
    pub fn into_body(self) -> Option<Vec<u8>> {
        self.body
    }
}
