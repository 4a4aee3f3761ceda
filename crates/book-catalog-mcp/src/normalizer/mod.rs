//! Catalog result normalizer.
//!
//! Turns raw, schema-inconsistent catalog responses into [`SearchResponse`]s.
//! Normalization is total and pure: malformed input degrades field by field
//! to defaults, nothing here returns an error or performs I/O.

pub mod fields;
pub mod google_books;
pub mod isbn;
mod merge;
pub mod open_library;

pub use merge::merge;

use serde_json::Value;

use crate::config::NormalizerConfig;
use crate::models::{CatalogSource, SearchResponse};

/// Normalize a raw response from `source`.
///
/// `Combined` is not a wire format; the catalog is inferred from the shape
/// (`items` means Google Books, anything else is treated as Open Library).
#[must_use]
pub fn normalize(raw: &Value, source: CatalogSource, config: &NormalizerConfig) -> SearchResponse {
    let source = match source {
        CatalogSource::Combined => detect_source(raw),
        other => other,
    };

    if !raw.is_object() {
        return SearchResponse::empty(source);
    }

    let response = match source {
        CatalogSource::GoogleBooks => google_books::normalize(raw, config),
        _ => open_library::normalize(raw, config),
    };

    tracing::debug!(
        source = %response.source,
        total = response.total_items,
        books = response.books.len(),
        "Normalized catalog response"
    );

    response
}

/// Guess which catalog produced a raw response.
#[must_use]
pub fn detect_source(raw: &Value) -> CatalogSource {
    if raw.get("items").is_some() || raw.get("kind").and_then(Value::as_str) == Some("books#volumes") {
        CatalogSource::GoogleBooks
    } else {
        CatalogSource::OpenLibrary
    }
}

/// Result count from the first non-negative integer among the configured
/// count fields, else the number of documents actually returned.
#[must_use]
pub fn resolve_count(raw: &Value, config: &NormalizerConfig, returned: usize) -> u64 {
    config
        .count_fields
        .iter()
        .filter_map(|name| raw.get(name.as_str()))
        .find_map(Value::as_u64)
        .unwrap_or(returned as u64)
}
