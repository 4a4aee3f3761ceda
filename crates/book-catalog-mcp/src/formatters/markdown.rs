//! Markdown output formatting.

use std::borrow::Cow;

use crate::models::{Book, CatalogSource, SearchResponse};

const DESCRIPTION_LIMIT: usize = 300;
const CATEGORY_LIMIT: usize = 5;

/// Format a search response as Markdown.
#[must_use]
pub fn format_books_markdown(response: &SearchResponse) -> String {
    if response.is_empty() {
        return "No books found.".to_string();
    }

    let mut output = format!(
        "# Books ({} shown of {} from {})\n\n",
        response.books.len(),
        response.total_items,
        response.source.display_name()
    );

    for (i, book) in response.books.iter().enumerate() {
        output.push_str(&format_book_markdown(book, i + 1, response.source));
        output.push_str("\n---\n\n");
    }

    output
}

/// Format a single book as Markdown. An `index` of 0 omits the numbering.
#[must_use]
pub fn format_book_markdown(book: &Book, index: usize, source: CatalogSource) -> String {
    let mut output = String::new();

    // Title
    if index > 0 {
        output.push_str(&format!("## {}. {}\n\n", index, book.title));
    } else {
        output.push_str(&format!("## {}\n\n", book.title));
    }

    if !book.authors.is_empty() {
        output.push_str(&format!("**Authors**: {}\n\n", book.author_names()));
    }

    let mut meta = Vec::new();
    if let Some(year) = book.published_year {
        meta.push(format!("**Year**: {year}"));
    }
    if let Some(publisher) = &book.publisher {
        meta.push(format!("**Publisher**: {publisher}"));
    }
    if let Some(language) = &book.language {
        meta.push(format!("**Language**: {language}"));
    }
    if !meta.is_empty() {
        output.push_str(&format!("{}\n\n", meta.join(" | ")));
    }

    if !book.categories.is_empty() {
        let shown: Vec<&str> =
            book.categories.iter().take(CATEGORY_LIMIT).map(String::as_str).collect();
        let more = book.categories.len().saturating_sub(CATEGORY_LIMIT);
        if more > 0 {
            output.push_str(&format!("**Categories**: {} (+{more} more)\n\n", shown.join(", ")));
        } else {
            output.push_str(&format!("**Categories**: {}\n\n", shown.join(", ")));
        }
    }

    let mut ids = Vec::new();
    if let Some(isbn13) = &book.isbn13 {
        ids.push(format!("ISBN-13 {isbn13}"));
    }
    if let Some(isbn10) = &book.isbn10 {
        ids.push(format!("ISBN-10 {isbn10}"));
    }
    if !ids.is_empty() {
        output.push_str(&format!("**ISBN**: {}\n\n", ids.join(" | ")));
    }

    if let Some(link) = source.book_url(&book.id) {
        output.push_str(&format!("**Link**: [{}]({link})\n\n", source.display_name()));
    }

    if let Some(thumbnail) = &book.thumbnail {
        output.push_str(&format!("**Cover**: ![cover]({thumbnail})\n\n"));
    }

    if let Some(description) = &book.description {
        output.push_str(&format!("**Description**: {}\n", truncate(description, DESCRIPTION_LIMIT)));
    }

    output
}

/// Truncate on a char boundary.
fn truncate(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
        None => Cow::Borrowed(text),
    }
}
