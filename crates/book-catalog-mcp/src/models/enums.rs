//! Enumeration types for API and tool parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::book::SYNTHETIC_ID_PREFIX;

/// Output format for tool responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable Markdown format.
    #[default]
    Markdown,
    /// Machine-readable JSON format.
    Json,
}

/// Which catalog produced (or should answer) a search.
///
/// Serializes to the fixed labels carried in `SearchResponse::source`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    /// openlibrary.org search API.
    #[serde(alias = "openLibrary", alias = "openlibrary")]
    OpenLibrary,
    /// Google Books volumes API.
    #[serde(alias = "googleBooks", alias = "google")]
    GoogleBooks,
    /// Both catalogs, merged.
    #[default]
    #[serde(alias = "all")]
    Combined,
}

impl CatalogSource {
    /// Fixed label for this source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenLibrary => "open_library",
            Self::GoogleBooks => "google_books",
            Self::Combined => "combined",
        }
    }

    /// Human-facing catalog name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::OpenLibrary => "Open Library",
            Self::GoogleBooks => "Google Books",
            Self::Combined => "Open Library + Google Books",
        }
    }

    /// Public page for a book id, if the source has one.
    ///
    /// Open Library pages exist only for work keys (`OL…W`); edition keys and
    /// synthesized ids get no link.
    #[must_use]
    pub fn book_url(self, id: &str) -> Option<String> {
        match self {
            Self::OpenLibrary if is_work_key(id) => {
                Some(format!("https://openlibrary.org/works/{id}"))
            }
            Self::GoogleBooks if !id.starts_with(SYNTHETIC_ID_PREFIX) => {
                Some(format!("https://books.google.com/books?id={id}"))
            }
            _ => None,
        }
    }
}

/// `OL` + digits + `W`.
fn is_work_key(id: &str) -> bool {
    id.strip_prefix("OL")
        .and_then(|rest| rest.strip_suffix('W'))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_source_labels() {
        assert_eq!(serde_json::to_value(CatalogSource::OpenLibrary).unwrap(), "open_library");
        assert_eq!(serde_json::to_value(CatalogSource::GoogleBooks).unwrap(), "google_books");
        assert_eq!(CatalogSource::Combined.to_string(), "combined");
    }

    #[test]
    fn test_catalog_source_aliases() {
        let source: CatalogSource = serde_json::from_str("\"openLibrary\"").unwrap();
        assert_eq!(source, CatalogSource::OpenLibrary);
        let source: CatalogSource = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(source, CatalogSource::Combined);
    }

    #[test]
    fn test_book_url() {
        assert_eq!(
            CatalogSource::OpenLibrary.book_url("OL45804W").as_deref(),
            Some("https://openlibrary.org/works/OL45804W")
        );
        assert!(CatalogSource::Combined.book_url("x").is_none());
    }

    #[test]
    fn test_book_url_skips_non_work_ids() {
        assert!(CatalogSource::OpenLibrary.book_url("OL7353617M").is_none());
        assert!(CatalogSource::OpenLibrary.book_url("anon-0123456789abcdef").is_none());
        assert!(CatalogSource::OpenLibrary.book_url("OLW").is_none());
        assert!(CatalogSource::GoogleBooks.book_url("anon-0123456789abcdef").is_none());
        assert_eq!(
            CatalogSource::GoogleBooks.book_url("B1XyCgAAQBAJ").as_deref(),
            Some("https://books.google.com/books?id=B1XyCgAAQBAJ")
        );
    }
}
