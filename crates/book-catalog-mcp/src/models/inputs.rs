//! Input models for MCP tool parameters.

use serde::{Deserialize, Serialize};

use super::{CatalogSource, ResponseFormat};

/// Input for book search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBooksInput {
    /// Free-text query (title, author, subject...).
    pub query: String,

    /// Catalog to search.
    #[serde(default)]
    pub source: CatalogSource,

    /// Maximum books to return per catalog.
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Results to skip.
    #[serde(default)]
    pub offset: u32,

    /// Restrict to a language code (e.g., "en", "eng").
    #[serde(default)]
    pub language: Option<String>,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

fn default_limit() -> u32 {
    20
}

/// Input for ISBN lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupIsbnInput {
    /// ISBN-10 or ISBN-13, hyphens allowed.
    pub isbn: String,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Input for offline normalization of a raw catalog response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeResponseInput {
    /// Raw catalog response body.
    pub response: serde_json::Value,

    /// Catalog the response came from.
    #[serde(default = "default_normalize_source")]
    pub source: CatalogSource,
}

fn default_normalize_source() -> CatalogSource {
    CatalogSource::OpenLibrary
}
