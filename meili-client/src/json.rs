//! JSON implementation of the encoder.
//!
//! This module provides the concrete [`Encoder`] used against a Meilisearch
//! server, backed by `serde_json`.

use serde_json::Value;

use crate::errors::CodecError;
use crate::interfaces::Encoder;

/// [`Encoder`] that reads and writes JSON.
///
/// # Example
///
/// ```
/// use meili_client::{EncoderExt, JsonEncoder, UpdateStatus};
///
/// let encoder = JsonEncoder::new();
/// assert_eq!(encoder.encode_as(&UpdateStatus::Enqueued).unwrap(), b"\"enqueued\"");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder {
    pretty: bool,
}

impl JsonEncoder {
    /// Create an encoder producing compact JSON.
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Create an encoder producing indented JSON.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        let result = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        result.map_err(|e| CodecError::encode("serde_json::Value", e.to_string()))
    }

    fn decode(&self, body: &[u8]) -> Result<Value, CodecError> {
        serde_json::from_slice(body).map_err(|e| {
            CodecError::decode(
                "serde_json::Value",
                e.to_string(),
                &String::from_utf8_lossy(body),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::EncoderExt;
    use crate::update::UpdateStatus;
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Model {
        id: String,
    }

    #[test]
    fn test_encodes_value_to_json() {
        let bytes = JsonEncoder::new()
            .encode_as(&Model {
                id: "alpha".to_string(),
            })
            .unwrap();

        assert_eq!(bytes, br#"{"id":"alpha"}"#);
    }

    #[test]
    fn test_decodes_json_to_value() {
        let model: Model = JsonEncoder::new().decode_as(br#"{"id":"alpha"}"#).unwrap();

        assert_eq!(
            model,
            Model {
                id: "alpha".to_string()
            }
        );
    }

    #[test]
    fn test_round_trip() {
        let encoder = JsonEncoder::pretty();
        let model = Model {
            id: "tt0111161".to_string(),
        };

        let bytes = encoder.encode_as(&model).unwrap();
        let decoded: Model = encoder.decode_as(&bytes).unwrap();

        assert_eq!(decoded, model);
    }

    #[test]
    fn test_status_is_lowercase_on_the_wire() {
        let encoder = JsonEncoder::new();

        assert_eq!(encoder.encode_as(&UpdateStatus::Enqueued).unwrap(), b"\"enqueued\"");

        let status: UpdateStatus = encoder.decode_as(b"\"processed\"").unwrap();
        assert_eq!(status, UpdateStatus::Processed);
    }

    #[test]
    fn test_status_decoding_ignores_case() {
        let status: UpdateStatus = JsonEncoder::new().decode_as(b"\"FAILED\"").unwrap();
        assert_eq!(status, UpdateStatus::Failed);
    }

    #[test]
    fn test_unknown_status_reports_payload() {
        let err = JsonEncoder::new()
            .decode_as::<UpdateStatus>(b"\"paused\"")
            .unwrap_err();

        match err {
            CodecError::Decode { target, fragment, .. } => {
                assert!(target.ends_with("UpdateStatus"));
                assert_eq!(fragment, "\"paused\"");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_timestamp_keeps_offset() {
        let encoder = JsonEncoder::new();
        let at: DateTime<FixedOffset> = encoder
            .decode_as(b"\"2020-04-12T18:32:02.581+05:30\"")
            .unwrap();

        assert_eq!(at.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
        let back: DateTime<FixedOffset> = encoder.decode_as(&encoder.encode_as(&at).unwrap()).unwrap();
        assert_eq!(back, at);
    }

    #[test]
    fn test_malformed_json_is_codec_error() {
        let err = JsonEncoder::new().decode(b"{\"id\":").unwrap_err();
        assert!(matches!(err, CodecError::Decode { .. }));
    }

    #[test]
    fn test_empty_body_is_codec_error() {
        let err = JsonEncoder::new().decode_body::<Model>(None).unwrap_err();
        assert!(matches!(err, CodecError::EmptyBody { .. }));
    }
}
