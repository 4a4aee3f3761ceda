//! Discovery tools: search_books, lookup_isbn.

use serde_json::json;

use super::{McpTool, ToolContext};
use crate::config::api;
use crate::error::{ToolError, ToolResult};
use crate::formatters;
use crate::models::{CatalogSource, LookupIsbnInput, ResponseFormat, SearchBooksInput};
use crate::normalizer::isbn;

/// Reject page sizes outside `1..=MAX_PAGE_SIZE`.
pub fn validate_limit(limit: u32) -> ToolResult<()> {
    if limit == 0 || limit > api::MAX_PAGE_SIZE {
        return Err(ToolError::validation(
            "limit",
            format!("must be between 1 and {}", api::MAX_PAGE_SIZE),
        ));
    }
    Ok(())
}

/// Book search tool.
pub struct SearchBooksTool;

#[async_trait::async_trait]
impl McpTool for SearchBooksTool {
    fn name(&self) -> &'static str {
        "search_books"
    }

    fn description(&self) -> &'static str {
        "Search for books by title, author or subject in Open Library and Google Books. \
         Results from both catalogs are normalized and deduplicated by ISBN."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query (e.g., 'dune frank herbert')"
                },
                "source": {
                    "type": "string",
                    "enum": ["open_library", "google_books", "combined"],
                    "default": "combined"
                },
                "limit": {
                    "type": "integer",
                    "default": 20,
                    "minimum": 1,
                    "maximum": api::MAX_PAGE_SIZE,
                    "description": "Maximum books per catalog (Google Books caps at 40)"
                },
                "offset": {
                    "type": "integer",
                    "default": 0
                },
                "language": {
                    "type": "string",
                    "description": "Language code filter (e.g., 'en' for Google Books, 'eng' for Open Library)"
                },
                "responseFormat": {
                    "type": "string",
                    "enum": ["markdown", "json"],
                    "default": "markdown"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: SearchBooksInput = serde_json::from_value(input)?;

        let query = params.query.trim();
        if query.is_empty() {
            return Err(ToolError::validation("query", "cannot be empty"));
        }
        validate_limit(params.limit)?;

        let language = params.language.as_deref().map(str::trim).filter(|l| !l.is_empty());

        let response = ctx
            .client
            .search(params.source, query, params.offset, params.limit, language)
            .await
            .map_err(ToolError::from)?;

        tracing::info!(
            query,
            source = %params.source,
            total = response.total_items,
            returned = response.books.len(),
            "Book search complete"
        );

        match params.response_format {
            ResponseFormat::Markdown => {
                let mut output = formatters::format_books_markdown(&response);
                if response.has_more(params.offset) {
                    output.push_str(&format!(
                        "_More results available: use offset {}._\n",
                        params.offset.saturating_add(params.limit)
                    ));
                }
                Ok(output)
            }
            ResponseFormat::Json => {
                Ok(serde_json::to_string_pretty(&formatters::compact_response(&response))?)
            }
        }
    }
}

/// ISBN lookup tool.
pub struct LookupIsbnTool;

#[async_trait::async_trait]
impl McpTool for LookupIsbnTool {
    fn name(&self) -> &'static str {
        "lookup_isbn"
    }

    fn description(&self) -> &'static str {
        "Look up a single book by ISBN-10 or ISBN-13. Tries Google Books first, \
         then Open Library."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "isbn": {
                    "type": "string",
                    "description": "ISBN-10 or ISBN-13, hyphens allowed (e.g., '978-0-441-01359-3')"
                },
                "responseFormat": {
                    "type": "string",
                    "enum": ["markdown", "json"],
                    "default": "markdown"
                }
            },
            "required": ["isbn"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: LookupIsbnInput = serde_json::from_value(input)?;

        let cleaned = isbn::clean(&params.isbn);
        if isbn::classify(&cleaned, true).is_none() {
            return Err(ToolError::validation("isbn", "not a valid ISBN-10 or ISBN-13"));
        }

        let Some(book) = ctx.client.lookup_isbn(&cleaned).await.map_err(ToolError::from)? else {
            return Ok(format!("No book found for ISBN {cleaned}."));
        };

        match params.response_format {
            ResponseFormat::Markdown => {
                Ok(formatters::format_book_markdown(&book, 0, CatalogSource::Combined))
            }
            ResponseFormat::Json => Ok(serde_json::to_string_pretty(&formatters::compact_book(&book))?),
        }
    }
}
