//! Tool tests: input validation, output formats and offline normalization.
//!
//! Catalog traffic is served by wiremock.
#![allow(clippy::needless_pass_by_value)]

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use book_catalog_mcp::client::CatalogClient;
use book_catalog_mcp::config::Config;
use book_catalog_mcp::error::ToolError;
use book_catalog_mcp::tools::{
    LookupIsbnTool, McpTool, NormalizeResponseTool, SearchBooksTool, ToolContext,
    register_all_tools,
};

/// Create a test context with a mock server.
fn setup_test_context(mock_server: &MockServer) -> ToolContext {
    let config = Config::for_testing(&mock_server.uri());
    let client = CatalogClient::new(config).unwrap();
    ToolContext::new(Arc::new(client))
}

/// Context whose catalogs are never reached.
fn offline_context() -> ToolContext {
    let client = CatalogClient::new(Config::for_testing("http://127.0.0.1:9")).unwrap();
    ToolContext::new(Arc::new(client))
}

fn dune_page() -> serde_json::Value {
    json!({
        "numFound": 7,
        "docs": [{
            "key": "/works/OL893415W",
            "title": "Dune",
            "author_name": ["Frank Herbert"],
            "first_publish_year": 1965,
            "isbn": ["0441013597", "9780441013593"],
            "subject": ["Science fiction", "Deserts"],
            "cover_i": 11_481_354
        }]
    })
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn test_registered_tools() {
    let tools = register_all_tools();
    let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();

    assert_eq!(names, vec!["search_books", "lookup_isbn", "normalize_response"]);
    for tool in &tools {
        assert!(!tool.description().is_empty());
        assert_eq!(tool.input_schema()["type"], "object");
    }
}

// =============================================================================
// SearchBooksTool
// =============================================================================

#[tokio::test]
async fn test_search_books_rejects_blank_query() {
    let ctx = offline_context();
    let err = SearchBooksTool.execute(&ctx, json!({"query": "   "})).await.unwrap_err();

    assert!(matches!(err, ToolError::Validation { ref field, .. } if field == "query"));
    assert_eq!(err.to_user_message(), "Invalid input for 'query': cannot be empty");
}

#[tokio::test]
async fn test_search_books_rejects_limit_out_of_range() {
    let ctx = offline_context();

    for limit in [0, 101] {
        let err = SearchBooksTool
            .execute(&ctx, json!({"query": "dune", "limit": limit}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Validation { ref field, .. } if field == "limit"));
    }
}

#[tokio::test]
async fn test_search_books_rejects_missing_query() {
    let ctx = offline_context();
    let err = SearchBooksTool.execute(&ctx, json!({"limit": 5})).await.unwrap_err();
    assert!(matches!(err, ToolError::Serialization(_)));
}

#[tokio::test]
async fn test_search_books_markdown() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openlibrary/search.json"))
        .and(query_param("q", "dune"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dune_page()))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result = SearchBooksTool
        .execute(&ctx, json!({"query": "dune", "source": "open_library", "limit": 5}))
        .await
        .unwrap();

    assert!(result.starts_with("# Books (1 shown of 7 from Open Library)"));
    assert!(result.contains("## 1. Dune"));
    assert!(result.contains("Frank Herbert"));
    assert!(result.contains("9780441013593"));
    assert!(result.contains("https://openlibrary.org/works/OL893415W"));
    assert!(result.contains("use offset 5"));
}

#[tokio::test]
async fn test_search_books_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/openlibrary/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dune_page()))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result = SearchBooksTool
        .execute(&ctx, json!({"query": "dune", "source": "openLibrary", "responseFormat": "json"}))
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
    assert_eq!(parsed["totalItems"], 7);
    assert_eq!(parsed["source"], "open_library");
    assert_eq!(parsed["books"][0]["id"], "OL893415W");
    assert_eq!(parsed["books"][0]["isbn10"], "0441013597");
    assert_eq!(parsed["books"][0]["year"], 1965);
}

#[tokio::test]
async fn test_search_books_no_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"totalItems": 0})))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result = SearchBooksTool
        .execute(&ctx, json!({"query": "zzzz", "source": "google_books"}))
        .await
        .unwrap();

    assert_eq!(result, "No books found.");
}

#[tokio::test]
async fn test_search_books_surfaces_rate_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "3"))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let err = SearchBooksTool
        .execute(&ctx, json!({"query": "dune", "source": "google"}))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 429);
    assert!(err.to_user_message().starts_with("Rate limited"));
}

// =============================================================================
// LookupIsbnTool
// =============================================================================

#[tokio::test]
async fn test_lookup_isbn_rejects_invalid() {
    let ctx = offline_context();

    for isbn in ["", "12345", "1234567890", "9780441013590"] {
        let err = LookupIsbnTool.execute(&ctx, json!({"isbn": isbn})).await.unwrap_err();
        assert!(
            matches!(err, ToolError::Validation { ref field, .. } if field == "isbn"),
            "{isbn} should be rejected"
        );
    }
}

#[tokio::test]
async fn test_lookup_isbn_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .and(query_param("q", "isbn:0441013597"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalItems": 1,
            "items": [{
                "id": "B1XyCgAAQBAJ",
                "volumeInfo": {
                    "title": "Dune",
                    "authors": ["Frank Herbert"],
                    "industryIdentifiers": [
                        {"type": "ISBN_10", "identifier": "0441013597"}
                    ]
                }
            }]
        })))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result = LookupIsbnTool.execute(&ctx, json!({"isbn": "0-441-01359-7"})).await.unwrap();

    assert!(result.starts_with("## Dune"));
    assert!(result.contains("ISBN-10 0441013597"));

    let json_result = LookupIsbnTool
        .execute(&ctx, json!({"isbn": "0441013597", "responseFormat": "json"}))
        .await
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json_result).unwrap();
    assert_eq!(parsed["id"], "B1XyCgAAQBAJ");
}

#[tokio::test]
async fn test_lookup_isbn_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"totalItems": 0})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/openlibrary/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"numFound": 0, "docs": []})))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result = LookupIsbnTool.execute(&ctx, json!({"isbn": "9780441013593"})).await.unwrap();

    assert_eq!(result, "No book found for ISBN 9780441013593.");
}

// =============================================================================
// NormalizeResponseTool
// =============================================================================

#[tokio::test]
async fn test_normalize_response_open_library() {
    let ctx = offline_context();
    let result = NormalizeResponseTool
        .execute(&ctx, json!({"response": dune_page()}))
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
    assert_eq!(parsed["totalItems"], 7);
    assert_eq!(parsed["source"], "open_library");
    assert_eq!(parsed["books"][0]["title"], "Dune");
    assert_eq!(parsed["books"][0]["isbn13"], "9780441013593");
    assert_eq!(
        parsed["books"][0]["thumbnail"],
        "https://covers.openlibrary.org/b/id/11481354-M.jpg"
    );
}

#[tokio::test]
async fn test_normalize_response_infers_google_books() {
    let ctx = offline_context();
    let raw = json!({
        "kind": "books#volumes",
        "totalItems": 1,
        "items": [{"id": "abc", "volumeInfo": {"title": "Emma"}}]
    });

    let result = NormalizeResponseTool
        .execute(&ctx, json!({"response": raw, "source": "combined"}))
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
    assert_eq!(parsed["source"], "google_books");
    assert_eq!(parsed["books"][0]["id"], "abc");
}

#[tokio::test]
async fn test_normalize_response_tolerates_garbage() {
    let ctx = offline_context();
    let result = NormalizeResponseTool
        .execute(&ctx, json!({"response": {"docs": "not a list", "numFound": -3}}))
        .await
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
    assert_eq!(parsed["totalItems"], 0);
    assert_eq!(parsed["books"], json!([]));
}
