//! Client error types.
//!
//! This module defines the single error type returned by every public
//! operation of the client.

use thiserror::Error;

use super::{CodecError, TransportError};

/// Errors that can occur during client operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeiliError {
    /// A document type or descriptor carries unusable metadata.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The request never got a response from the server.
    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),

    /// A payload could not be encoded or decoded.
    #[error("Codec error: {0}")]
    CodecError(#[from] CodecError),

    /// The server answered an operation with an unexpected status.
    #[error("Operation `{operation}` failed with status {status}")]
    OperationError {
        /// Name of the attempted operation.
        operation: &'static str,
        /// HTTP status observed.
        status: u16,
    },

    /// An API was used outside the flow it was built for.
    #[error("Illegal state: {0}")]
    IllegalState(String),
}

impl MeiliError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create an operation error.
    pub fn operation(operation: &'static str, status: u16) -> Self {
        Self::OperationError { operation, status }
    }

    /// Create an illegal state error.
    pub fn illegal_state(msg: impl Into<String>) -> Self {
        Self::IllegalState(msg.into())
    }
}
