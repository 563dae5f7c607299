//! # Meili Client
//!
//! A typed client for the Meilisearch REST API. Documents are plain serde
//! types bound to an index through the [`Document`] trait. Writes are
//! asynchronous on the server side and return an [`Update`] that can be
//! refreshed until it reaches a terminal status.
//!
//! The crate performs no I/O of its own: requests go through an injected
//! [`Remote`] and bodies through an injected [`Encoder`]. `meili-remote-http`
//! provides the HTTP transport; [`JsonEncoder`] is the serde_json codec.

pub mod client;
pub mod config;
pub mod document;
pub mod errors;
pub mod index;
pub mod interfaces;
pub mod json;
pub mod page;
pub mod query;
pub mod types;
pub mod update;

#[cfg(test)]
mod testing;

pub use client::Client;
pub use config::ClientConfig;
pub use document::{Document, DocumentDescriptor};
pub use errors::{CodecError, MeiliError, TransportError};
pub use index::Index;
pub use interfaces::{Encoder, EncoderExt, Method, Remote};
pub use json::JsonEncoder;
pub use page::{Page, SearchPage};
pub use query::{PageConfig, QueryParameters, SearchConfig};
pub use types::{Request, Response};
pub use update::{JobType, Update, UpdateInfo, UpdateStatus};
