//! Index handle.
//!
//! An [`Index`] binds a document type to a Meilisearch index and exposes the
//! index-level operations. Every operation builds exactly one [`Request`],
//! sends it through the injected [`Remote`] and interprets exactly one
//! [`Response`]. Write operations return an [`Update`] tracking the enqueued
//! job.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::document::{is_valid_identifier, Document, DocumentDescriptor};
use crate::errors::MeiliError;
use crate::interfaces::{encoder::to_tree, Encoder, EncoderExt, Remote};
use crate::page::{Page, SearchPage, SearchResponse};
use crate::query::{PageConfig, QueryParameters, SearchConfig};
use crate::types::{Request, Response};
use crate::update::{Update, UpdateInfo};

/// Status the server answers write operations with.
const ACCEPTED: u16 = 202;

const OK: u16 = 200;

const NOT_FOUND: u16 = 404;

/// Body sent to create an index.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewIndex<'a> {
    uid: &'a str,
    primary_key: &'a str,
}

/// A Meilisearch index holding documents of type `T`.
///
/// The remote and encoder are shared, not owned: cloning an index is cheap
/// and clones may be used from different tasks at the same time.
///
/// # Example
///
/// ```ignore
/// let index = Index::<Movie>::new(remote, Arc::new(JsonEncoder::new()))?;
///
/// let update = index.insert(&movies).await?;
/// if !update.done() {
///     // poll later with update.refresh().await
/// }
/// let movie = index.get("tt0111161").await?;
/// ```
pub struct Index<T> {
    descriptor: DocumentDescriptor,
    remote: Arc<dyn Remote>,
    encoder: Arc<dyn Encoder>,
    refresh_on_submit: bool,
    _document: PhantomData<fn() -> T>,
}

impl<T: Document> Index<T> {
    /// Bind the index declared by `T`.
    ///
    /// # Errors
    ///
    /// * `ConfigurationError` - if `T` declares an unusable index name or primary key
    pub fn new(remote: Arc<dyn Remote>, encoder: Arc<dyn Encoder>) -> Result<Self, MeiliError> {
        Ok(Self::with_descriptor(
            DocumentDescriptor::of::<T>()?,
            remote,
            encoder,
        ))
    }
}

impl<T> Index<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    /// Bind an explicitly registered index.
    pub fn with_descriptor(
        descriptor: DocumentDescriptor,
        remote: Arc<dyn Remote>,
        encoder: Arc<dyn Encoder>,
    ) -> Self {
        Self {
            descriptor: descriptor.bound_to::<T>(),
            remote,
            encoder,
            refresh_on_submit: true,
            _document: PhantomData,
        }
    }

    /// Choose whether write operations refresh their update once before
    /// returning. Enabled by default.
    pub fn refresh_on_submit(mut self, enabled: bool) -> Self {
        self.refresh_on_submit = enabled;
        self
    }

    /// The index uid.
    pub fn uid(&self) -> &str {
        self.descriptor.index_name()
    }

    /// The name of the primary key field.
    pub fn primary_key(&self) -> &str {
        self.descriptor.primary_key()
    }

    /// The resolved descriptor.
    pub fn descriptor(&self) -> &DocumentDescriptor {
        &self.descriptor
    }

    fn path(&self, suffix: &str) -> String {
        format!("/indexes/{}{}", self.uid(), suffix)
    }

    /// Check whether the index exists on the server.
    ///
    /// Only a 404 counts as absent; any other answer means the index was not
    /// confirmed missing.
    #[instrument(skip(self), fields(uid = %self.uid()))]
    pub async fn exists(&self) -> Result<bool, MeiliError> {
        let response = self.remote.get(Request::new(self.path(""))).await?;
        let exists = response.status() != NOT_FOUND;
        debug!(status = response.status(), exists, "Checked index existence");
        Ok(exists)
    }

    /// Create the index on the server.
    #[instrument(skip(self), fields(uid = %self.uid()))]
    pub async fn create(&self) -> Result<(), MeiliError> {
        let body = self.encoder.encode_as(&NewIndex {
            uid: self.uid(),
            primary_key: self.primary_key(),
        })?;
        let response = self
            .remote
            .post(Request::new("/indexes").with_body(body))
            .await?;

        if !response.is_success() {
            error!(status = response.status(), "Index creation failed");
            return Err(MeiliError::operation("create", response.status()));
        }

        info!(primary_key = %self.primary_key(), "Created index");
        Ok(())
    }

    /// Fetch a single document by id. A missing document is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// * `ConfigurationError` - if `id` is empty or contains anything but
    ///   alphanumerics, `-` and `_`; no request is sent
    #[instrument(skip(self), fields(uid = %self.uid()))]
    pub async fn get(&self, id: &str) -> Result<Option<T>, MeiliError> {
        if !is_valid_identifier(id) {
            return Err(MeiliError::configuration(format!(
                "document id `{id}` may only contain alphanumerics, `-` and `_`"
            )));
        }
        let path = self.path(&format!("/documents/{id}"));
        let response = self.remote.get(Request::new(path)).await?;

        match response.status() {
            OK => Ok(Some(self.encoder.decode_body(response.body())?)),
            NOT_FOUND => {
                debug!("Document not found");
                Ok(None)
            }
            status => {
                error!(status, "Fetching document failed");
                Err(MeiliError::operation("get", status))
            }
        }
    }

    /// Fetch every document of the index in one request.
    ///
    /// The server applies its default page size; use [`page`](Self::page)
    /// to walk larger indexes.
    #[instrument(skip(self), fields(uid = %self.uid()))]
    pub async fn all(&self) -> Result<Vec<T>, MeiliError> {
        let response = self
            .remote
            .get(Request::new(self.path("/documents")))
            .await?;
        let documents: Vec<T> = self.decode_ok("all", &response)?;
        debug!(count = documents.len(), "Fetched documents");
        Ok(documents)
    }

    /// Fetch one page of documents.
    #[instrument(skip(self), fields(uid = %self.uid(), limit = config.limit, offset = config.offset))]
    pub async fn page(&self, config: &PageConfig) -> Result<Page<T>, MeiliError> {
        let request =
            Request::new(self.path("/documents")).with_queries(config.to_query_parameters());
        let response = self.remote.get(request).await?;
        let documents: Vec<T> = self.decode_ok("page", &response)?;
        Ok(Page::new(documents, config.clone()))
    }

    /// Run a search query.
    #[instrument(skip(self, config), fields(uid = %self.uid(), query = %config.query))]
    pub async fn search(&self, config: &SearchConfig) -> Result<SearchPage<T>, MeiliError> {
        let request =
            Request::new(self.path("/search")).with_queries(config.to_query_parameters());
        let response = self.remote.get(request).await?;
        let body: SearchResponse<T> = self.decode_ok("search", &response)?;
        debug!(hits = body.nb_hits, "Search completed");
        Ok(SearchPage::from_response(body, config.clone()))
    }

    /// Add documents, replacing any existing document with the same id.
    #[instrument(skip(self, documents), fields(uid = %self.uid(), count = documents.len()))]
    pub async fn insert(&self, documents: &[T]) -> Result<Update, MeiliError> {
        let body = self.encoder.encode_as(documents)?;
        let response = self
            .remote
            .post(Request::new(self.path("/documents")).with_body(body))
            .await?;
        self.submit("insert", response).await
    }

    /// Add documents, merging them into existing documents with the same id.
    #[instrument(skip(self, documents), fields(uid = %self.uid(), count = documents.len()))]
    pub async fn update(&self, documents: &[T]) -> Result<Update, MeiliError> {
        let body = self.encoder.encode_as(documents)?;
        let response = self
            .remote
            .put(Request::new(self.path("/documents")).with_body(body))
            .await?;
        self.submit("update", response).await
    }

    /// Delete the given documents, identified by their primary key.
    #[instrument(skip(self, documents), fields(uid = %self.uid(), count = documents.len()))]
    pub async fn delete(&self, documents: &[T]) -> Result<Update, MeiliError> {
        let ids = self.document_ids(documents)?;
        let body = self.encoder.encode_as(&ids)?;
        let response = self
            .remote
            .post(Request::new(self.path("/documents/delete-batch")).with_body(body))
            .await?;
        self.submit("delete", response).await
    }

    /// Delete every document of the index.
    #[instrument(skip(self), fields(uid = %self.uid()))]
    pub async fn clear(&self) -> Result<Update, MeiliError> {
        let response = self
            .remote
            .delete(Request::new(self.path("/documents")))
            .await?;
        self.submit("clear", response).await
    }

    /// Decode a 200 response, failing the operation on any other status.
    fn decode_ok<R: DeserializeOwned>(
        &self,
        operation: &'static str,
        response: &Response,
    ) -> Result<R, MeiliError> {
        if response.status() != OK {
            error!(operation, status = response.status(), "Unexpected status");
            return Err(MeiliError::operation(operation, response.status()));
        }
        Ok(self.encoder.decode_body(response.body())?)
    }

    /// Turn the answer of a write operation into a bound update.
    async fn submit(
        &self,
        operation: &'static str,
        response: Response,
    ) -> Result<Update, MeiliError> {
        if response.status() != ACCEPTED {
            error!(operation, status = response.status(), "Write was not accepted");
            return Err(MeiliError::operation(operation, response.status()));
        }

        let info: UpdateInfo = self.encoder.decode_body(response.body())?;
        drop(response);
        debug!(operation, update_id = info.update_id, "Update enqueued");

        let mut update = Update::bound(
            info,
            self.uid(),
            Arc::clone(&self.remote),
            Arc::clone(&self.encoder),
        );
        if self.refresh_on_submit {
            update.refresh().await?;
        }
        Ok(update)
    }

    /// Extract the primary key value of each document.
    fn document_ids(&self, documents: &[T]) -> Result<Vec<Value>, MeiliError> {
        documents
            .iter()
            .map(|document| {
                let id = match to_tree(document)? {
                    Value::Object(mut fields) => fields.remove(self.primary_key()),
                    _ => None,
                };
                match id {
                    Some(id @ (Value::String(_) | Value::Number(_))) => Ok(id),
                    _ => Err(MeiliError::configuration(format!(
                        "document of {} has no usable `{}` field",
                        self.descriptor.element_type(),
                        self.primary_key()
                    ))),
                }
            })
            .collect()
    }
}

impl<T> Clone for Index<T> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor.clone(),
            remote: Arc::clone(&self.remote),
            encoder: Arc::clone(&self.encoder),
            refresh_on_submit: self.refresh_on_submit,
            _document: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Index<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("uid", &self.descriptor.index_name())
            .field("primary_key", &self.descriptor.primary_key())
            .field("document_type", &self.descriptor.element_type())
            .finish()
    }
}
