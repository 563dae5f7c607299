//! Interface definitions for the client's collaborators.
//!
//! This module defines the abstract `Remote` and `Encoder` traits that keep
//! the transport and the wire format swappable and mockable.

pub(crate) mod encoder;
mod remote;

pub use encoder::{Encoder, EncoderExt};
pub use remote::{Method, Remote};
