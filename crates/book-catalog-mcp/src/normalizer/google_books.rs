//! Google Books volumes response normalization.

use serde_json::Value;

use super::fields;
use super::isbn;
use crate::config::NormalizerConfig;
use crate::models::{Book, CatalogSource, SearchResponse, UNTITLED};

/// Normalize a volumes response (`{totalItems, items: [...]}`).
///
/// Google omits `items` entirely when nothing matched.
#[must_use]
pub fn normalize(raw: &Value, config: &NormalizerConfig) -> SearchResponse {
    let items = raw.get("items").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();
    let books: Vec<Book> = items.iter().map(|item| normalize_volume(item, config)).collect();
    let total_items = super::resolve_count(raw, config, books.len());

    SearchResponse { total_items, books, source: CatalogSource::GoogleBooks }
}

/// Normalize one volume. Total: any JSON value yields a `Book`.
#[must_use]
pub fn normalize_volume(item: &Value, config: &NormalizerConfig) -> Book {
    let info = item.get("volumeInfo").unwrap_or(&Value::Null);

    let identifiers = info
        .get("industryIdentifiers")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter(|entry| {
            entry.get("type").and_then(Value::as_str).is_some_and(|kind| kind.starts_with("ISBN"))
        })
        .filter_map(|entry| entry.get("identifier"));
    let isbns = isbn::collect(identifiers, config.validate_isbn_checksum);

    let thumbnail = info.get("imageLinks").and_then(|links| {
        fields::first_present(links, &["thumbnail", "smallThumbnail"]).and_then(fields::https_url)
    });

    Book {
        id: item
            .get("id")
            .and_then(fields::identifier)
            .unwrap_or_else(|| fields::digest_id(item)),
        title: info
            .get("title")
            .and_then(Value::as_str)
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(UNTITLED)
            .to_string(),
        authors: fields::string_list(info, &["authors"]),
        publisher: fields::string_field(info, &["publisher"]),
        language: fields::string_field(info, &["language"]),
        isbn10: isbns.isbn10,
        isbn13: isbns.isbn13,
        categories: fields::string_list(info, &["categories"]),
        thumbnail,
        published_year: fields::year_field(info, &["publishedDate"]),
        description: fields::string_field(info, &["description"]),
    }
}
