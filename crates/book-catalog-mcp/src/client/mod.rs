//! Book catalog API client.
//!
//! Provides async HTTP access to Open Library and Google Books with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff
//! - Fixed-delay rate limiting for uncached requests
//! - Raw response caching with 5-minute TTL
//!
//! Responses are normalized before they leave this module.

mod middleware;

pub use middleware::USER_AGENT;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::RetryError;
use serde_json::Value;

use crate::config::{Config, NormalizerConfig, api, fields};
use crate::error::{ClientError, ClientResult};
use crate::models::{Book, CatalogSource, SearchResponse};
use crate::normalizer::{self, isbn};

/// Results fetched per catalog when resolving an ISBN.
const ISBN_LOOKUP_LIMIT: u32 = 5;

/// Open Library + Google Books client.
#[derive(Clone)]
pub struct CatalogClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Raw response cache.
    cache: Cache<String, Value>,

    /// Google Books API key (optional).
    google_api_key: Option<String>,

    /// Open Library base URL.
    open_library_url: String,

    /// Google Books base URL.
    google_books_url: String,

    /// Rate limit delay.
    rate_limit_delay: Duration,

    /// Request timeout, reported on timeouts.
    request_timeout: Duration,

    /// Normalizer tunables.
    normalizer: Arc<NormalizerConfig>,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = middleware::build(&config)?;

        let cache = Cache::builder()
            .max_capacity(config.cache_max_size)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            client,
            cache,
            google_api_key: config.google_api_key,
            open_library_url: config.open_library_url,
            google_books_url: config.google_books_url,
            rate_limit_delay: config.rate_limit_delay,
            request_timeout: config.request_timeout,
            normalizer: Arc::new(config.normalizer),
        })
    }

    /// Check if a Google Books API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.google_api_key.is_some()
    }

    /// Normalizer settings used for every response.
    #[must_use]
    pub fn normalizer_config(&self) -> &NormalizerConfig {
        &self.normalizer
    }

    /// Search one catalog, or both when `source` is `Combined`.
    ///
    /// # Errors
    ///
    /// Returns error on API failure. A combined search only fails when both
    /// catalogs fail.
    pub async fn search(
        &self,
        source: CatalogSource,
        query: &str,
        offset: u32,
        limit: u32,
        language: Option<&str>,
    ) -> ClientResult<SearchResponse> {
        match source {
            CatalogSource::OpenLibrary => {
                self.search_open_library(query, offset, limit, language).await
            }
            CatalogSource::GoogleBooks => {
                self.search_google_books(query, offset, limit, language).await
            }
            CatalogSource::Combined => self.search_combined(query, offset, limit, language).await,
        }
    }

    /// Search Open Library.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search_open_library(
        &self,
        query: &str,
        offset: u32,
        limit: u32,
        language: Option<&str>,
    ) -> ClientResult<SearchResponse> {
        let url = format!("{}/search.json", self.open_library_url);

        // Open Library filters language through the query syntax
        let q = match language {
            Some(lang) => format!("{query} language:{lang}"),
            None => query.to_string(),
        };

        let params = vec![
            ("q".to_string(), q),
            ("offset".to_string(), offset.to_string()),
            ("limit".to_string(), limit.clamp(1, api::OPEN_LIBRARY_MAX_LIMIT).to_string()),
            ("fields".to_string(), fields::OPEN_LIBRARY_SEARCH.join(",")),
        ];

        let raw = self.get_json(&url, &params).await?;
        Ok(normalizer::normalize(&raw, CatalogSource::OpenLibrary, &self.normalizer))
    }

    /// Search Google Books volumes.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search_google_books(
        &self,
        query: &str,
        offset: u32,
        limit: u32,
        language: Option<&str>,
    ) -> ClientResult<SearchResponse> {
        let url = format!("{}/volumes", self.google_books_url);

        let mut params = vec![
            ("q".to_string(), query.to_string()),
            ("startIndex".to_string(), offset.to_string()),
            ("maxResults".to_string(), limit.clamp(1, api::GOOGLE_MAX_RESULTS).to_string()),
        ];

        if let Some(lang) = language {
            params.push(("langRestrict".to_string(), lang.to_string()));
        }

        if let Some(ref key) = self.google_api_key {
            params.push(("key".to_string(), key.clone()));
        }

        let raw = self.get_json(&url, &params).await?;
        Ok(normalizer::normalize(&raw, CatalogSource::GoogleBooks, &self.normalizer))
    }

    /// Query both catalogs concurrently and merge.
    async fn search_combined(
        &self,
        query: &str,
        offset: u32,
        limit: u32,
        language: Option<&str>,
    ) -> ClientResult<SearchResponse> {
        let (google, open_library) = futures::join!(
            self.search_google_books(query, offset, limit, language),
            self.search_open_library(query, offset, limit, language),
        );

        match (google, open_library) {
            (Ok(google), Ok(open_library)) => Ok(normalizer::merge(vec![google, open_library])),
            (Ok(only), Err(err)) | (Err(err), Ok(only)) => {
                tracing::warn!(
                    error = %err,
                    answered = %only.source,
                    "One catalog failed, returning partial results"
                );
                Ok(normalizer::merge(vec![only]))
            }
            (Err(err), Err(other)) => {
                tracing::warn!(error = %other, "Both catalogs failed");
                Err(err)
            }
        }
    }

    /// Find a book by ISBN, asking Google Books first and Open Library second.
    ///
    /// Prefers a result whose own ISBN matches; otherwise the first result.
    ///
    /// # Errors
    ///
    /// Returns error only when both catalogs fail.
    pub async fn lookup_isbn(&self, isbn: &str) -> ClientResult<Option<Book>> {
        let isbn = isbn::clean(isbn);
        let query = format!("isbn:{isbn}");
        let mut errors = Vec::new();

        for source in [CatalogSource::GoogleBooks, CatalogSource::OpenLibrary] {
            match self.search(source, &query, 0, ISBN_LOOKUP_LIMIT, None).await {
                Ok(response) => {
                    let mut books = response.books;
                    if let Some(pos) = books.iter().position(|b| b.has_isbn(&isbn)) {
                        return Ok(Some(books.swap_remove(pos)));
                    }
                    if !books.is_empty() {
                        return Ok(Some(books.swap_remove(0)));
                    }
                    tracing::debug!(%source, %isbn, "No ISBN match");
                }
                Err(err) => {
                    tracing::warn!(%source, %isbn, error = %err, "ISBN lookup failed");
                    errors.push(err);
                }
            }
        }

        // Both catalogs failed
        if errors.len() == 2 {
            return Err(errors.swap_remove(1));
        }

        Ok(None)
    }

    /// GET a JSON document, through the cache.
    async fn get_json(&self, url: &str, params: &[(String, String)]) -> ClientResult<Value> {
        let cache_key = self.cache_key("GET", url, params);
        if let Some(cached) = self.cache.get(&cache_key).await {
            tracing::trace!(url, "Cache hit");
            return Ok(cached);
        }

        // Rate limit
        tokio::time::sleep(self.rate_limit_delay).await;

        tracing::debug!(url, "Catalog request");
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|err| self.map_send_error(err))?;

        let response = self.handle_response(response).await?;
        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;

        self.cache.insert(cache_key, value.clone()).await;

        Ok(value)
    }

    fn map_send_error(&self, err: reqwest_middleware::Error) -> ClientError {
        if is_timeout(&err) {
            ClientError::Timeout(self.request_timeout)
        } else {
            ClientError::from(err)
        }
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        tracing::debug!(status = status.as_u16(), "Catalog returned error status");

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }

    /// Generate cache key.
    fn cache_key(&self, method: &str, url: &str, params: &[(String, String)]) -> String {
        use md5::{Digest, Md5};

        let mut hasher = Md5::new();
        hasher.update(method.as_bytes());
        hasher.update(b"|");
        hasher.update(url.as_bytes());
        hasher.update(b"|");

        for (k, v) in params {
            hasher.update(k.as_bytes());
            hasher.update(b"=");
            hasher.update(v.as_bytes());
            hasher.update(b"&");
        }

        format!("{:x}", hasher.finalize())
    }
}

/// Whether a send failure was the request timeout firing.
///
/// The retry middleware wraps every transport error in a `RetryError`, even
/// when no retry happened, and that wrapper is transparent to `source()`, so
/// the original reqwest error has to be dug out by type.
fn is_timeout(err: &reqwest_middleware::Error) -> bool {
    match err {
        reqwest_middleware::Error::Reqwest(e) => e.is_timeout(),
        reqwest_middleware::Error::Middleware(e) => {
            if let Some(RetryError::WithRetries { err, .. } | RetryError::Error(err)) =
                e.downcast_ref::<RetryError>()
            {
                return is_timeout(err);
            }
            e.chain().any(|cause| {
                cause.downcast_ref::<reqwest::Error>().is_some_and(reqwest::Error::is_timeout)
            })
        }
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("has_api_key", &self.has_api_key())
            .field("open_library_url", &self.open_library_url)
            .field("google_books_url", &self.google_books_url)
            .finish()
    }
}
