//! Open Library search response normalization.
//!
//! Field aliases also cover `Book`'s own serialized names, so feeding a
//! normalized book back through yields the same book.

use serde_json::Value;

use super::fields::{self, first_present};
use super::isbn;
use crate::config::NormalizerConfig;
use crate::models::{Book, CatalogSource, SearchResponse, UNTITLED};

const ID_FIELDS: &[&str] = &["key", "id"];
const AUTHOR_FIELDS: &[&str] = &["author_name", "authors"];
const PUBLISHER_FIELDS: &[&str] = &["publisher"];
const LANGUAGE_FIELDS: &[&str] = &["language"];
const ISBN_FIELDS: &[&str] = &["isbn", "isbn13", "isbn10", "isbn_13", "isbn_10"];
const CATEGORY_FIELDS: &[&str] = &["subject", "categories"];
const YEAR_FIELDS: &[&str] = &["first_publish_year", "publishedYear", "publish_year"];
const DESCRIPTION_FIELDS: &[&str] = &["description", "first_sentence"];

/// Normalize a full search response (`{numFound, docs: [...]}`).
#[must_use]
pub fn normalize(raw: &Value, config: &NormalizerConfig) -> SearchResponse {
    let docs = raw.get("docs").and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();
    let books: Vec<Book> = docs.iter().map(|doc| normalize_doc(doc, config)).collect();
    let total_items = super::resolve_count(raw, config, books.len());

    SearchResponse { total_items, books, source: CatalogSource::OpenLibrary }
}

/// Normalize one search document. Total: any JSON value yields a `Book`.
#[must_use]
pub fn normalize_doc(doc: &Value, config: &NormalizerConfig) -> Book {
    let isbns = isbn::collect(
        ISBN_FIELDS.iter().filter_map(|name| doc.get(*name)),
        config.validate_isbn_checksum,
    );

    Book {
        id: resolve_id(doc),
        title: doc
            .get("title")
            .and_then(Value::as_str)
            .filter(|title| !title.trim().is_empty())
            .unwrap_or(UNTITLED)
            .to_string(),
        authors: fields::string_list(doc, AUTHOR_FIELDS),
        publisher: fields::string_field(doc, PUBLISHER_FIELDS),
        language: fields::string_field(doc, LANGUAGE_FIELDS),
        isbn10: isbns.isbn10,
        isbn13: isbns.isbn13,
        categories: fields::string_list(doc, CATEGORY_FIELDS),
        thumbnail: resolve_thumbnail(doc, config),
        published_year: fields::year_field(doc, YEAR_FIELDS),
        description: fields::string_field(doc, DESCRIPTION_FIELDS),
    }
}

/// Work key (`/works/OL45804W` -> `OL45804W`), then first edition key, then a digest.
fn resolve_id(doc: &Value) -> String {
    first_present(doc, ID_FIELDS)
        .and_then(fields::identifier)
        .and_then(|key| last_segment(&key))
        .or_else(|| fields::string_field(doc, &["edition_key"]).and_then(|key| last_segment(&key)))
        .unwrap_or_else(|| fields::digest_id(doc))
}

/// Last non-blank path segment, trimmed. Output contains no `/`, so it maps to itself.
fn last_segment(key: &str) -> Option<String> {
    key.rsplit('/').map(str::trim).find(|segment| !segment.is_empty()).map(ToOwned::to_owned)
}

/// Cover URL from a usable `cover_i`, else a pass-through `thumbnail` URL.
fn resolve_thumbnail(doc: &Value, config: &NormalizerConfig) -> Option<String> {
    let from_cover = doc
        .get("cover_i")
        .and_then(fields::integer)
        .filter(|id| !config.is_cover_sentinel(*id))
        .map(|id| config.cover_url(id));

    from_cover.or_else(|| doc.get("thumbnail").and_then(fields::https_url))
}
