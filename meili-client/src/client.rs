//! Entry point binding a remote and an encoder.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, instrument};

use crate::config::ClientConfig;
use crate::document::{Document, DocumentDescriptor};
use crate::errors::MeiliError;
use crate::index::Index;
use crate::interfaces::{Encoder, Remote};

/// Hands out [`Index`] handles sharing one remote and one encoder.
///
/// # Example
///
/// ```ignore
/// let client = Client::new(Arc::new(HttpRemote::new(config)?), Arc::new(JsonEncoder::new()));
/// let movies = client.index::<Movie>().await?;
/// ```
#[derive(Clone)]
pub struct Client {
    remote: Arc<dyn Remote>,
    encoder: Arc<dyn Encoder>,
    config: ClientConfig,
}

impl Client {
    /// Create a client with the default configuration.
    pub fn new(remote: Arc<dyn Remote>, encoder: Arc<dyn Encoder>) -> Self {
        Self::with_config(remote, encoder, ClientConfig::default())
    }

    pub fn with_config(
        remote: Arc<dyn Remote>,
        encoder: Arc<dyn Encoder>,
        config: ClientConfig,
    ) -> Self {
        Self {
            remote,
            encoder,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the index declared by `T`, creating it if missing and the
    /// configuration allows it.
    ///
    /// # Errors
    ///
    /// * `ConfigurationError` - if `T` declares an unusable descriptor
    /// * `OperationError` - if the index had to be created and creation failed
    /// * `TransportError` - if the server could not be reached
    pub async fn index<T: Document>(&self) -> Result<Index<T>, MeiliError> {
        self.index_with(self.config.auto_create_index).await
    }

    /// Get the index declared by `T`, overriding the auto-create setting.
    pub async fn index_with<T: Document>(&self, auto_create: bool) -> Result<Index<T>, MeiliError> {
        self.index_for(DocumentDescriptor::of::<T>()?, auto_create)
            .await
    }

    /// Get an explicitly registered index.
    #[instrument(skip(self, descriptor), fields(uid = %descriptor.index_name()))]
    pub async fn index_for<T>(
        &self,
        descriptor: DocumentDescriptor,
        auto_create: bool,
    ) -> Result<Index<T>, MeiliError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let index = Index::with_descriptor(
            descriptor,
            Arc::clone(&self.remote),
            Arc::clone(&self.encoder),
        )
        .refresh_on_submit(self.config.refresh_on_submit);

        if auto_create && !index.exists().await? {
            info!("Index missing, creating it");
            index.create().await?;
        }
        Ok(index)
    }
}
