//! Query parameter builders for paged and search requests.
//!
//! [`PageConfig`] and [`SearchConfig`] are plain structs with public fields
//! and defaults. Parameters that hold their default or are absent are left
//! out of the compiled query to keep request URLs short.

use std::collections::BTreeMap;

/// Attribute list meaning "every attribute".
pub const ALL_ATTRIBUTES: &str = "*";

/// Default number of documents per page.
pub const DEFAULT_LIMIT: u32 = 20;

/// Default number of characters kept around a cropped match.
pub const DEFAULT_CROP_LENGTH: u32 = 200;

/// Something that compiles into request query parameters.
pub trait QueryParameters {
    /// The query parameters for this configuration.
    fn to_query_parameters(&self) -> BTreeMap<String, String>;
}

/// Fetch configuration of a single page of documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    /// Maximum number of documents to return.
    pub limit: u32,
    /// Number of documents to skip.
    pub offset: u32,
    /// Attributes to retrieve; `["*"]` retrieves all of them.
    pub attributes: Vec<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            attributes: vec![ALL_ATTRIBUTES.to_string()],
        }
    }
}

impl PageConfig {
    /// Create a config for the given window, retrieving all attributes.
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit,
            offset,
            ..Self::default()
        }
    }

    /// Restrict the retrieved attributes.
    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Whether every attribute is retrieved.
    pub fn retrieves_all_attributes(&self) -> bool {
        self.attributes.is_empty()
            || (self.attributes.len() == 1 && self.attributes[0] == ALL_ATTRIBUTES)
    }
}

impl QueryParameters for PageConfig {
    fn to_query_parameters(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("limit".to_string(), self.limit.to_string());
        params.insert("offset".to_string(), self.offset.to_string());
        if !self.retrieves_all_attributes() {
            params.insert("attributes".to_string(), self.attributes.join(","));
        }
        params
    }
}

/// Search configuration: a page window plus the search options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Window and attribute selection.
    pub page: PageConfig,
    /// The query string.
    pub query: String,
    /// Attributes whose values are cropped around the match.
    pub attributes_to_crop: Option<Vec<String>>,
    /// Number of characters kept on each side of a cropped match.
    pub crop_length: u32,
    /// Attributes whose matching words are highlighted.
    pub attributes_to_highlight: Option<Vec<String>>,
    /// Filter expression.
    pub filters: Option<String>,
    /// Whether match positions are returned.
    pub matches: bool,
}

impl SearchConfig {
    /// Create a search for the given query with default options.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            page: PageConfig::default(),
            query: query.into(),
            attributes_to_crop: None,
            crop_length: DEFAULT_CROP_LENGTH,
            attributes_to_highlight: None,
            filters: None,
            matches: false,
        }
    }

    /// Set the page window.
    pub fn with_page(mut self, page: PageConfig) -> Self {
        self.page = page;
        self
    }

    /// Crop the given attributes.
    pub fn with_crop<I, S>(mut self, attributes: I, length: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes_to_crop = Some(attributes.into_iter().map(Into::into).collect());
        self.crop_length = length;
        self
    }

    /// Highlight the given attributes.
    pub fn with_highlight<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes_to_highlight = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Set the filter expression.
    pub fn with_filters(mut self, filters: impl Into<String>) -> Self {
        self.filters = Some(filters.into());
        self
    }

    /// Request match positions.
    pub fn with_matches(mut self) -> Self {
        self.matches = true;
        self
    }
}

impl QueryParameters for SearchConfig {
    fn to_query_parameters(&self) -> BTreeMap<String, String> {
        let mut params = self.page.to_query_parameters();
        params.insert("q".to_string(), self.query.clone());
        params.insert("cropLength".to_string(), self.crop_length.to_string());
        if let Some(ref attributes) = self.attributes_to_crop {
            params.insert("attributesToCrop".to_string(), attributes.join(","));
        }
        if let Some(ref attributes) = self.attributes_to_highlight {
            params.insert("attributesToHighlight".to_string(), attributes.join(","));
        }
        if let Some(ref filters) = self.filters {
            params.insert("filters".to_string(), filters.clone());
        }
        if self.matches {
            params.insert("matches".to_string(), "true".to_string());
        }
        params
    }
}
