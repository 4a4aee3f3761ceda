//! Normalized book model shared by every catalog.

use serde::{Deserialize, Serialize};

use super::CatalogSource;

/// Title used when a catalog document has none.
pub const UNTITLED: &str = "Untitled";

/// Prefix of ids synthesized for documents that carry none.
pub const SYNTHETIC_ID_PREFIX: &str = "anon-";

/// A book, normalized from any catalog.
///
/// Produced only by the normalizer, which guarantees `id` and `title` are
/// non-empty and optional fields are `None` rather than invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Identifier, unique within the source catalog.
    pub id: String,

    /// Title (falls back to [`UNTITLED`]).
    pub title: String,

    /// Author names in catalog order.
    #[serde(default)]
    pub authors: Vec<String>,

    /// First listed publisher.
    #[serde(default)]
    pub publisher: Option<String>,

    /// First listed language code.
    #[serde(default)]
    pub language: Option<String>,

    /// ISBN-10, digits only (may end in `X`).
    #[serde(default)]
    pub isbn10: Option<String>,

    /// ISBN-13, digits only.
    #[serde(default)]
    pub isbn13: Option<String>,

    /// Subjects / categories.
    #[serde(default)]
    pub categories: Vec<String>,

    /// Cover thumbnail URL.
    #[serde(default)]
    pub thumbnail: Option<String>,

    /// Year of first publication.
    #[serde(default)]
    pub published_year: Option<i32>,

    /// Description or first sentence.
    #[serde(default)]
    pub description: Option<String>,
}

impl Book {
    /// Get the first author's name if available.
    #[must_use]
    pub fn first_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }

    /// Get author names as a comma-separated string.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors.join(", ")
    }

    /// Whether either ISBN equals `isbn` (hyphens ignored).
    #[must_use]
    pub fn has_isbn(&self, isbn: &str) -> bool {
        let wanted: String = isbn.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        [&self.isbn10, &self.isbn13]
            .into_iter()
            .flatten()
            .any(|own| own.eq_ignore_ascii_case(&wanted))
    }
}

/// Normalized search response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Total matches reported upstream (or the page size when unreported).
    pub total_items: u64,

    /// Books in this page.
    #[serde(default)]
    pub books: Vec<Book>,

    /// Catalog that produced the data.
    pub source: CatalogSource,
}

impl SearchResponse {
    /// Empty response for a source.
    #[must_use]
    pub const fn empty(source: CatalogSource) -> Self {
        Self { total_items: 0, books: Vec::new(), source }
    }

    /// Check if the page has no books.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Check if more results exist past this page.
    #[must_use]
    pub fn has_more(&self, offset: u32) -> bool {
        (u64::from(offset) + self.books.len() as u64) < self.total_items
    }
}
