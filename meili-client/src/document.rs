//! Document declarations.
//!
//! A document type names the index it lives in and its primary key field by
//! implementing [`Document`]. The pair is resolved into a validated
//! [`DocumentDescriptor`] once, when an [`Index`](crate::Index) is bound.

use std::any::type_name;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::MeiliError;

/// A record stored in a Meilisearch index.
///
/// # Example
///
/// ```
/// use meili_client::{Document, DocumentDescriptor};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Movie {
///     id: String,
///     title: String,
/// }
///
/// impl Document for Movie {
///     const INDEX: &'static str = "movies";
///     const PRIMARY_KEY: &'static str = "id";
/// }
///
/// let descriptor = DocumentDescriptor::of::<Movie>().unwrap();
/// assert_eq!(descriptor.index_name(), "movies");
/// ```
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Uid of the index holding documents of this type.
    const INDEX: &'static str;

    /// Name of the field holding the document id.
    const PRIMARY_KEY: &'static str;
}

/// Static metadata binding a document type to its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDescriptor {
    index_name: String,
    primary_key: String,
    element_type: &'static str,
}

impl DocumentDescriptor {
    /// Register an index explicitly, without a [`Document`] implementation.
    pub fn new(
        index_name: impl Into<String>,
        primary_key: impl Into<String>,
    ) -> Result<Self, MeiliError> {
        Self::validated(index_name.into(), primary_key.into(), "unregistered")
    }

    /// Resolve the descriptor declared by `T`.
    pub fn of<T: Document>() -> Result<Self, MeiliError> {
        Self::validated(
            T::INDEX.to_string(),
            T::PRIMARY_KEY.to_string(),
            type_name::<T>(),
        )
    }

    fn validated(
        index_name: String,
        primary_key: String,
        element_type: &'static str,
    ) -> Result<Self, MeiliError> {
        if index_name.is_empty() {
            return Err(MeiliError::configuration(format!(
                "{element_type} does not declare an index name"
            )));
        }
        if !is_valid_uid(&index_name) {
            return Err(MeiliError::configuration(format!(
                "index name `{index_name}` of {element_type} may only contain alphanumerics, `-` and `_`"
            )));
        }
        if primary_key.is_empty() {
            return Err(MeiliError::configuration(format!(
                "{element_type} does not declare a primary key"
            )));
        }

        Ok(Self {
            index_name,
            primary_key,
            element_type,
        })
    }

    /// Uid of the bound index.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Name of the primary key field.
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Rust type name of the documents.
    pub fn element_type(&self) -> &'static str {
        self.element_type
    }

    /// Record `T` as the document type of this descriptor.
    pub(crate) fn bound_to<T>(mut self) -> Self {
        self.element_type = type_name::<T>();
        self
    }
}

/// Whether `id` is a usable index uid or document id: non-empty and limited
/// to alphanumerics, `-` and `_`.
pub(crate) fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty() && is_valid_uid(id)
}

fn is_valid_uid(uid: &str) -> bool {
    uid.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
