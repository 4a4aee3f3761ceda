//! Normalization tools: normalize_response.

use serde_json::json;

use super::{McpTool, ToolContext};
use crate::error::ToolResult;
use crate::models::NormalizeResponseInput;
use crate::normalizer;

/// Offline normalization of a raw catalog response.
pub struct NormalizeResponseTool;

#[async_trait::async_trait]
impl McpTool for NormalizeResponseTool {
    fn name(&self) -> &'static str {
        "normalize_response"
    }

    fn description(&self) -> &'static str {
        "Normalize a raw Open Library or Google Books search response into \
         {totalItems, books, source} without calling any API."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "response": {
                    "type": "object",
                    "description": "Raw search response body"
                },
                "source": {
                    "type": "string",
                    "enum": ["open_library", "google_books", "combined"],
                    "default": "open_library",
                    "description": "Catalog that produced the response ('combined' infers it)"
                }
            },
            "required": ["response"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: NormalizeResponseInput = serde_json::from_value(input)?;

        let normalized =
            normalizer::normalize(&params.response, params.source, ctx.client.normalizer_config());

        Ok(serde_json::to_string_pretty(&normalized)?)
    }
}
