//! MCP tool implementations.
//!
//! Each tool:
//! 1. Parses and validates input parameters
//! 2. Calls the catalog client (or the normalizer directly)
//! 3. Formats results as Markdown or JSON

mod discovery;
mod normalization;

pub use discovery::*;
pub use normalization::*;

use std::sync::Arc;

use crate::client::CatalogClient;
use crate::error::ToolResult;

/// Tool execution context.
pub struct ToolContext {
    /// Catalog client.
    pub client: Arc<CatalogClient>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub fn new(client: Arc<CatalogClient>) -> Self {
        Self { client }
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "search_books").
    fn name(&self) -> &'static str;

    /// Tool description for LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with given input.
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String>;
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        // Discovery tools (2)
        Box::new(discovery::SearchBooksTool),
        Box::new(discovery::LookupIsbnTool),
        // Normalization tools (1)
        Box::new(normalization::NormalizeResponseTool),
    ]
}
