//! Transport error types.
//!
//! Raised by [`Remote`](crate::interfaces::Remote) implementations when a
//! request could not be carried to the server or its answer could not be read.

use thiserror::Error;

/// Errors that can occur while exchanging a request with the server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Failed to establish a connection to the server.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request was sent but failed before a response arrived.
    #[error("Request error: {0}")]
    RequestError(String),

    /// The endpoint or request path does not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The response body could not be read.
    #[error("Body error: {0}")]
    BodyError(String),
}

impl TransportError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::RequestError(msg.into())
    }

    /// Create an invalid URL error.
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    /// Create a body error.
    pub fn body(msg: impl Into<String>) -> Self {
        Self::BodyError(msg.into())
    }
}
