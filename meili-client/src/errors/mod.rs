//! Error types for the Meilisearch client.

mod codec_error;
mod meili_error;
mod transport_error;

pub use codec_error::CodecError;
pub use meili_error::MeiliError;
pub use transport_error::TransportError;
