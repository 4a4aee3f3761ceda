//! Data models for normalized catalog entities and tool inputs.
//!
//! Raw catalog documents are never modelled as structs: they stay
//! `serde_json::Value` until the normalizer narrows them field by field.

mod book;
mod enums;
mod inputs;

pub use book::{Book, SYNTHETIC_ID_PREFIX, SearchResponse, UNTITLED};
pub use enums::{CatalogSource, ResponseFormat};
pub use inputs::*;
