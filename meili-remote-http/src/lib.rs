//! # Meili Remote HTTP
//!
//! An HTTP [`Remote`](meili_client::Remote) for `meili-client`, backed by
//! reqwest.

pub mod client;
pub mod config;

pub use client::HttpRemote;
pub use config::HttpRemoteConfig;
