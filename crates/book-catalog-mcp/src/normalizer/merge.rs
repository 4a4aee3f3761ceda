//! Merging of per-catalog responses into one deduplicated page.

use std::collections::HashMap;

use crate::models::{Book, CatalogSource, SearchResponse, UNTITLED};

/// Keys under which two records count as the same book.
fn identity_keys(book: &Book) -> Vec<String> {
    let mut keys = Vec::with_capacity(3);
    if let Some(isbn13) = &book.isbn13 {
        keys.push(format!("isbn13:{isbn13}"));
    }
    if let Some(isbn10) = &book.isbn10 {
        keys.push(format!("isbn10:{isbn10}"));
    }
    if let Some(author) = book.first_author() {
        if book.title != UNTITLED {
            keys.push(format!(
                "title:{}|{}",
                book.title.trim().to_lowercase(),
                author.trim().to_lowercase()
            ));
        }
    }
    keys
}

/// Fill `target`'s absent fields from `other`.
fn fill_missing(target: &mut Book, other: Book) {
    if target.authors.is_empty() {
        target.authors = other.authors;
    }
    if target.categories.is_empty() {
        target.categories = other.categories;
    }
    target.publisher = target.publisher.take().or(other.publisher);
    target.language = target.language.take().or(other.language);
    target.isbn10 = target.isbn10.take().or(other.isbn10);
    target.isbn13 = target.isbn13.take().or(other.isbn13);
    target.thumbnail = target.thumbnail.take().or(other.thumbnail);
    target.published_year = target.published_year.or(other.published_year);
    target.description = target.description.take().or(other.description);
}

/// Merge responses in order, dropping duplicate books.
///
/// The first occurrence of a book wins; later duplicates only fill its gaps.
/// `totalItems` is the sum of the upstream counts.
#[must_use]
pub fn merge(responses: Vec<SearchResponse>) -> SearchResponse {
    let total_items = responses.iter().fold(0u64, |acc, r| acc.saturating_add(r.total_items));

    let mut books: Vec<Book> = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for book in responses.into_iter().flat_map(|r| r.books) {
        let keys = identity_keys(&book);

        match keys.iter().find_map(|key| seen.get(key).copied()) {
            Some(index) => {
                fill_missing(&mut books[index], book);
                for key in identity_keys(&books[index]) {
                    seen.entry(key).or_insert(index);
                }
            }
            None => {
                let index = books.len();
                for key in keys {
                    seen.entry(key).or_insert(index);
                }
                books.push(book);
            }
        }
    }

    SearchResponse { total_items, books, source: CatalogSource::Combined }
}
