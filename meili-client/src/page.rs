//! Result pages.
//!
//! A [`Page`] pairs the documents returned by a request with the
//! configuration that fetched them. A [`SearchPage`] adds the result
//! metadata reported by the search endpoint.

use std::ops::Deref;
use std::slice;
use std::time::Duration;

use serde::Deserialize;

use crate::query::{PageConfig, SearchConfig};

/// A single page of documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T, C = PageConfig> {
    results: Vec<T>,
    config: C,
}

impl<T, C> Page<T, C> {
    /// Create a page from its results and the config that fetched them.
    pub fn new(results: Vec<T>, config: C) -> Self {
        Self { results, config }
    }

    /// The documents on this page.
    pub fn results(&self) -> &[T] {
        &self.results
    }

    /// The configuration used to fetch this page.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Number of documents on this page.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the page holds no documents.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterate over the documents.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.results.iter()
    }

    /// Take the documents out of the page.
    pub fn into_results(self) -> Vec<T> {
        self.results
    }
}

impl<T, C> IntoIterator for Page<T, C> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a Page<T, C> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// A single page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage<T> {
    page: Page<T, SearchConfig>,
    total_hits: u64,
    is_count_exhaustive: bool,
    processing_time: Duration,
}

impl<T> SearchPage<T> {
    pub(crate) fn from_response(response: SearchResponse<T>, config: SearchConfig) -> Self {
        Self {
            page: Page::new(response.hits, config),
            total_hits: response.nb_hits,
            is_count_exhaustive: response.exhaustive_nb_hits,
            processing_time: Duration::from_millis(response.processing_time_ms),
        }
    }

    /// Total number of hits reported by the server.
    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    /// Whether `total_hits` is exact.
    pub fn is_count_exhaustive(&self) -> bool {
        self.is_count_exhaustive
    }

    /// Time the server spent on the query.
    pub fn processing_time(&self) -> Duration {
        self.processing_time
    }

    /// Take the underlying page.
    pub fn into_page(self) -> Page<T, SearchConfig> {
        self.page
    }
}

impl<T> Deref for SearchPage<T> {
    type Target = Page<T, SearchConfig>;

    fn deref(&self) -> &Self::Target {
        &self.page
    }
}

impl<T> IntoIterator for SearchPage<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.page.into_iter()
    }
}

/// Body of a search response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResponse<T> {
    pub hits: Vec<T>,
    #[serde(default)]
    pub nb_hits: u64,
    #[serde(default)]
    pub exhaustive_nb_hits: bool,
    #[serde(default)]
    pub processing_time_ms: u64,
}
