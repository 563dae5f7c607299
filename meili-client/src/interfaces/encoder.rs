//! Encoder (codec) trait definition.
//!
//! An [`Encoder`] owns the byte format: it turns a document tree into wire
//! bytes and back. Typed conversion on top of that tree is shared by every
//! encoder through [`EncoderExt`], which is where the target type name used in
//! [`CodecError`] comes from.

use std::any::type_name;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::CodecError;

/// Abstract interface for the wire format.
///
/// The trait works on [`serde_json::Value`] trees so it stays object safe and
/// can be shared as `Arc<dyn Encoder>`. Value-level conventions (lowercase
/// update statuses, offset-aware timestamps) are carried by the serde
/// implementations of the types themselves and hold for every encoder.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`.
pub trait Encoder: Send + Sync {
    /// Encode a document tree into wire bytes.
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError>;

    /// Decode wire bytes into a document tree.
    fn decode(&self, body: &[u8]) -> Result<Value, CodecError>;
}

/// Typed helpers available on every [`Encoder`].
pub trait EncoderExt: Encoder {
    /// Encode any serializable value.
    fn encode_as<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        self.encode(&to_tree(value)?)
    }

    /// Decode wire bytes into `T`.
    fn decode_as<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, CodecError> {
        let tree = self.decode(body)?;
        T::deserialize(&tree)
            .map_err(|e| CodecError::decode(type_name::<T>(), e.to_string(), &tree.to_string()))
    }

    /// Decode an optional response body into `T`, failing when it is absent.
    fn decode_body<T: DeserializeOwned>(&self, body: Option<&[u8]>) -> Result<T, CodecError> {
        match body {
            Some(bytes) => self.decode_as(bytes),
            None => Err(CodecError::empty_body(type_name::<T>())),
        }
    }
}

impl<E: Encoder + ?Sized> EncoderExt for E {}

/// Convert a value to a document tree without going through bytes.
pub(crate) fn to_tree<T: Serialize + ?Sized>(value: &T) -> Result<Value, CodecError> {
    serde_json::to_value(value).map_err(|e| CodecError::encode(type_name::<T>(), e.to_string()))
}

