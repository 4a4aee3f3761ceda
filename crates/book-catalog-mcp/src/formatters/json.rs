//! Compact JSON output.

use serde_json::{Value, json};

use crate::models::{Book, SearchResponse};

/// Create a compact book representation for JSON output.
///
/// Absent optional fields are left out instead of serialized as `null`.
#[must_use]
pub fn compact_book(book: &Book) -> Value {
    let mut obj = json!({
        "id": book.id,
        "title": book.title,
    });

    if !book.authors.is_empty() {
        obj["authors"] = json!(book.authors);
    }

    if let Some(publisher) = &book.publisher {
        obj["publisher"] = json!(publisher);
    }

    if let Some(language) = &book.language {
        obj["language"] = json!(language);
    }

    if let Some(year) = book.published_year {
        obj["year"] = json!(year);
    }

    if let Some(isbn10) = &book.isbn10 {
        obj["isbn10"] = json!(isbn10);
    }

    if let Some(isbn13) = &book.isbn13 {
        obj["isbn13"] = json!(isbn13);
    }

    if !book.categories.is_empty() {
        obj["categories"] = json!(book.categories);
    }

    if let Some(thumbnail) = &book.thumbnail {
        obj["thumbnail"] = json!(thumbnail);
    }

    obj
}

/// Compact representation of a whole search response.
#[must_use]
pub fn compact_response(response: &SearchResponse) -> Value {
    json!({
        "totalItems": response.total_items,
        "source": response.source,
        "books": response.books.iter().map(compact_book).collect::<Vec<_>>(),
    })
}
