//! Normalizer behavior on realistic and malformed catalog responses.

use serde_json::json;

use book_catalog_mcp::config::NormalizerConfig;
use book_catalog_mcp::models::{CatalogSource, UNTITLED};
use book_catalog_mcp::normalizer::{self, open_library};

fn ol(raw: &serde_json::Value) -> book_catalog_mcp::models::SearchResponse {
    normalizer::normalize(raw, CatalogSource::OpenLibrary, &NormalizerConfig::default())
}

// =============================================================================
// Count Resolution
// =============================================================================

#[test]
fn test_duplicate_count_fields_agree() {
    let response = ol(&json!({"num_found": 629, "numFound": 629, "docs": []}));
    assert_eq!(response.total_items, 629);
}

#[test]
fn test_count_prefers_camel_case() {
    let response = ol(&json!({"num_found": 1, "numFound": 2, "docs": []}));
    assert_eq!(response.total_items, 2);
}

#[test]
fn test_count_falls_back_to_snake_case() {
    let response = ol(&json!({"num_found": 3, "docs": []}));
    assert_eq!(response.total_items, 3);
}

#[test]
fn test_count_defaults_to_docs_len() {
    let response = ol(&json!({"docs": [{"title": "A"}, {"title": "B"}]}));
    assert_eq!(response.total_items, 2);
}

#[test]
fn test_source_label_is_fixed() {
    let response = ol(&json!({"docs": []}));
    assert_eq!(response.source, CatalogSource::OpenLibrary);
    assert_eq!(serde_json::to_value(&response).unwrap()["source"], "open_library");
}

// =============================================================================
// Per-Document Fields
// =============================================================================

#[test]
fn test_missing_author_name_gives_empty_authors() {
    let response = ol(&json!({"docs": [{"title": "Anonymous Work"}]}));
    assert!(response.books[0].authors.is_empty());
}

#[test]
fn test_language_string_and_sequence() {
    let response = ol(&json!({"docs": [{"language": "en"}, {"language": ["en", "fr"]}]}));
    assert_eq!(response.books[0].language.as_deref(), Some("en"));
    assert_eq!(response.books[1].language.as_deref(), Some("en"));
}

#[test]
fn test_publisher_sequence_takes_first() {
    let response = ol(&json!({"docs": [{"publisher": ["Penguin", "Ace"]}]}));
    assert_eq!(response.books[0].publisher.as_deref(), Some("Penguin"));
}

#[test]
fn test_mixed_isbn_list() {
    let response = ol(&json!({"docs": [{"isbn": ["9781591846444", 1_234_567_890_u64]}]}));
    let book = &response.books[0];
    assert_eq!(book.isbn13.as_deref(), Some("9781591846444"));
    assert_eq!(book.isbn10, None);
}

#[test]
fn test_isbn_checksum_can_be_disabled() {
    let config = NormalizerConfig { validate_isbn_checksum: false, ..NormalizerConfig::default() };
    let book = open_library::normalize_doc(&json!({"isbn": [1_234_567_890_u64]}), &config);
    assert_eq!(book.isbn10.as_deref(), Some("1234567890"));
}

#[test]
fn test_hyphenated_isbn() {
    let response = ol(&json!({"docs": [{"isbn": "978-0-441-01359-3"}]}));
    assert_eq!(response.books[0].isbn13.as_deref(), Some("9780441013593"));
}

#[test]
fn test_zero_cover_has_no_thumbnail() {
    let response = ol(&json!({"docs": [{"cover_i": 0}]}));
    assert!(response.books[0].thumbnail.is_none());
}

#[test]
fn test_cover_builds_url() {
    let response = ol(&json!({"docs": [{"cover_i": 6_395_237}]}));
    let thumbnail = response.books[0].thumbnail.as_deref().unwrap();
    assert!(thumbnail.starts_with("https://"));
    assert!(thumbnail.contains("6395237"));
    assert!(url::Url::parse(thumbnail).is_ok());
}

#[test]
fn test_string_cover_id_is_not_numeric() {
    let response = ol(&json!({"docs": [{"cover_i": "6395237"}]}));
    assert!(response.books[0].thumbnail.is_none());
}

#[test]
fn test_empty_document_is_fully_defaulted() {
    let response = ol(&json!({"docs": [{}]}));
    let book = &response.books[0];
    assert_eq!(book.title, UNTITLED);
    assert!(book.authors.is_empty());
    assert!(book.thumbnail.is_none());
    assert!(book.categories.is_empty());
    assert!(book.publisher.is_none());
    assert!(book.language.is_none());
    assert!(!book.id.is_empty());
}

#[test]
fn test_categories_from_subject() {
    let response = ol(&json!({"docs": [{"subject": ["Fiction", "Desert"]}, {"subject": 5}]}));
    assert_eq!(response.books[0].categories, vec!["Fiction", "Desert"]);
    assert!(response.books[1].categories.is_empty());
}

// =============================================================================
// Whole-Response Shapes
// =============================================================================

#[test]
fn test_docs_not_an_array() {
    let response = ol(&json!({"numFound": 3, "docs": {"title": "oops"}}));
    assert!(response.books.is_empty());
    assert_eq!(response.total_items, 3);
}

#[test]
fn test_null_and_scalar_docs_still_yield_books() {
    let response = ol(&json!({"docs": [null, 7, "x", [1]]}));
    assert_eq!(response.books.len(), 4);
    assert!(response.books.iter().all(|b| b.title == UNTITLED));
}

#[test]
fn test_realistic_open_library_page() {
    let raw = json!({
        "numFound": 629,
        "num_found": 629,
        "start": 0,
        "numFoundExact": true,
        "docs": [
            {
                "key": "/works/OL27448W",
                "title": "The Lord of the Rings",
                "author_name": ["J.R.R. Tolkien"],
                "cover_i": 14_625_765,
                "first_publish_year": 1954,
                "language": ["eng", "spa"],
                "isbn": ["9780618640157", "0618640150"],
                "publisher": ["Houghton Mifflin"],
                "subject": ["Fantasy", "Middle Earth (Imaginary place)"]
            },
            {
                "key": "/works/OL262758W",
                "title": "The Hobbit",
                "author_name": "J.R.R. Tolkien",
                "cover_i": 0
            }
        ]
    });

    let response = ol(&raw);
    assert_eq!(response.total_items, 629);
    assert_eq!(response.books.len(), 2);

    let lotr = &response.books[0];
    assert_eq!(lotr.id, "OL27448W");
    assert_eq!(lotr.language.as_deref(), Some("eng"));
    assert_eq!(lotr.isbn13.as_deref(), Some("9780618640157"));
    assert_eq!(lotr.isbn10.as_deref(), Some("0618640150"));
    assert_eq!(lotr.published_year, Some(1954));

    let hobbit = &response.books[1];
    assert_eq!(hobbit.authors, vec!["J.R.R. Tolkien"]);
    assert!(hobbit.thumbnail.is_none());
}

#[test]
fn test_combined_source_infers_google_shape() {
    let raw = json!({"totalItems": 1, "items": [{"id": "g1", "volumeInfo": {"title": "T"}}]});
    let response = normalizer::normalize(&raw, CatalogSource::Combined, &NormalizerConfig::default());
    assert_eq!(response.source, CatalogSource::GoogleBooks);
    assert_eq!(response.books[0].id, "g1");
}

#[test]
fn test_normalizing_normalized_book_is_stable() {
    let raw = json!({
        "key": "/works/OL27448W",
        "title": "The Lord of the Rings",
        "author_name": ["J.R.R. Tolkien"],
        "cover_i": 14_625_765,
        "isbn": ["9780618640157"],
        "first_sentence": ["When Mr. Bilbo Baggins of Bag End announced..."]
    });

    let config = NormalizerConfig::default();
    let once = open_library::normalize_doc(&raw, &config);
    let twice = open_library::normalize_doc(&serde_json::to_value(&once).unwrap(), &config);
    assert_eq!(once, twice);
}
