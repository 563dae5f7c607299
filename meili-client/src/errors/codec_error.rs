//! Codec error types.
//!
//! Every variant names the Rust type that was being produced or consumed so a
//! failure can be traced back to the call site that requested it.

use thiserror::Error;

/// Maximum number of characters of an offending payload kept for diagnostics.
const FRAGMENT_LIMIT: usize = 256;

/// Errors that can occur while encoding or decoding wire payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A value could not be turned into wire bytes.
    #[error("Encode error for {target}: {message}")]
    Encode {
        /// Type name of the value being encoded.
        target: &'static str,
        /// Underlying serializer message.
        message: String,
    },

    /// A payload could not be turned into the requested type.
    #[error("Decode error for {target}: {message} (payload: {fragment})")]
    Decode {
        /// Type name of the value being decoded.
        target: &'static str,
        /// Underlying deserializer message.
        message: String,
        /// Leading part of the payload that failed to decode.
        fragment: String,
    },

    /// The server answered without a body where one was required.
    #[error("Empty body while decoding {target}")]
    EmptyBody {
        /// Type name of the value being decoded.
        target: &'static str,
    },
}

impl CodecError {
    /// Create an encode error.
    pub fn encode(target: &'static str, msg: impl Into<String>) -> Self {
        Self::Encode {
            target,
            message: msg.into(),
        }
    }

    /// Create a decode error, keeping a bounded prefix of the payload.
    pub fn decode(target: &'static str, msg: impl Into<String>, payload: &str) -> Self {
        Self::Decode {
            target,
            message: msg.into(),
            fragment: fragment(payload),
        }
    }

    /// Create an empty body error.
    pub fn empty_body(target: &'static str) -> Self {
        Self::EmptyBody { target }
    }
}

fn fragment(payload: &str) -> String {
    match payload.char_indices().nth(FRAGMENT_LIMIT) {
        Some((cut, _)) => format!("{}...", &payload[..cut]),
        None => payload.to_string(),
    }
}
