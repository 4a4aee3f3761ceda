//! Book Catalog MCP Server
//!
//! A Model Context Protocol (MCP) server for book discovery over the
//! Open Library and Google Books search APIs. Raw catalog responses are
//! normalized into a single [`models::Book`] shape regardless of which
//! catalog produced them.
//!
//! # Features
//!
//! - **Total normalization**: malformed catalog documents degrade field by field, never fail
//! - **Two catalogs**: Open Library and Google Books, searched alone or combined
//! - **Cached**: 5-minute TTL cache of raw responses
//! - **Two transports**: stdio JSON-RPC and HTTP (with a plain REST search endpoint)
//!
//! # Example
//!
//! ```no_run
//! use book_catalog_mcp::{client::CatalogClient, config::Config, models::CatalogSource};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = CatalogClient::new(config)?;
//!
//!     let result = client.search(CatalogSource::Combined, "dune", 0, 10, None).await?;
//!     println!("{} books", result.books.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod normalizer;
pub mod server;
pub mod tools;

pub use client::CatalogClient;
pub use config::{Config, NormalizerConfig};
pub use error::{ClientError, ToolError};
