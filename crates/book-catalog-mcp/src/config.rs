//! Configuration for the book catalog server.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Open Library base URL.
    pub const OPEN_LIBRARY_URL: &str = "https://openlibrary.org";

    /// Google Books API endpoint.
    pub const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1";

    /// Open Library covers endpoint for cover IDs.
    pub const COVERS_URL: &str = "https://covers.openlibrary.org/b/id";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Rate limit delay between uncached requests (100ms = 10 req/s).
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(100);

    /// Cache TTL (5 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Maximum cache size.
    pub const CACHE_MAX_SIZE: u64 = 1000;

    /// Retries for transient failures (5xx, timeouts).
    pub const MAX_RETRIES: u32 = 3;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// Google Books rejects `maxResults` above 40.
    pub const GOOGLE_MAX_RESULTS: u32 = 40;

    /// Open Library page size cap.
    pub const OPEN_LIBRARY_MAX_LIMIT: u32 = 100;

    /// Largest page a caller may ask for, through a tool or `/search`.
    pub const MAX_PAGE_SIZE: u32 = 100;
}

/// Field sets for catalog requests.
pub mod fields {
    /// Open Library search fields needed to build a `Book`.
    pub const OPEN_LIBRARY_SEARCH: &[&str] = &[
        "key",
        "title",
        "author_name",
        "publisher",
        "language",
        "isbn",
        "subject",
        "cover_i",
        "edition_key",
        "first_publish_year",
        "first_sentence",
    ];
}

/// Tunables for the catalog result normalizer.
///
/// The defaults match what Open Library actually returns today; upstream may
/// add further count-field variants or cover sentinels, so they stay configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Result-count field names, highest priority first.
    pub count_fields: Vec<String>,

    /// Cover identifiers meaning "no cover".
    pub cover_sentinels: Vec<i64>,

    /// Base URL cover IDs are appended to.
    pub cover_base_url: String,

    /// Cover size suffix (`S`, `M` or `L`).
    pub cover_size: String,

    /// Require ISBN candidates to pass their check digit.
    pub validate_isbn_checksum: bool,
}

impl NormalizerConfig {
    /// Build the thumbnail URL for a cover ID.
    #[must_use]
    pub fn cover_url(&self, cover_id: i64) -> String {
        format!("{}/{}-{}.jpg", self.cover_base_url.trim_end_matches('/'), cover_id, self.cover_size)
    }

    /// Whether a cover ID is a sentinel for "no cover".
    #[must_use]
    pub fn is_cover_sentinel(&self, cover_id: i64) -> bool {
        cover_id <= 0 || self.cover_sentinels.contains(&cover_id)
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            count_fields: ["numFound", "num_found", "totalItems", "total"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            cover_sentinels: vec![0],
            cover_base_url: api::COVERS_URL.to_string(),
            cover_size: "M".to_string(),
            validate_isbn_checksum: true,
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Books API key (optional, raises the daily quota).
    pub google_api_key: Option<String>,

    /// Base URL for Open Library (for testing with mock servers).
    pub open_library_url: String,

    /// Base URL for Google Books (for testing with mock servers).
    pub google_books_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Rate limit delay between requests.
    pub rate_limit_delay: Duration,

    /// Cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cache size.
    pub cache_max_size: u64,

    /// Retries for transient failures.
    pub max_retries: u32,

    /// Normalizer tunables.
    pub normalizer: NormalizerConfig,
}

impl Config {
    /// Create a new configuration with an optional Google Books API key.
    #[must_use]
    pub fn new(google_api_key: Option<String>) -> Self {
        Self {
            google_api_key,
            open_library_url: api::OPEN_LIBRARY_URL.to_string(),
            google_books_url: api::GOOGLE_BOOKS_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_delay: api::RATE_LIMIT_DELAY,
            cache_ttl: api::CACHE_TTL,
            cache_max_size: api::CACHE_MAX_SIZE,
            max_retries: api::MAX_RETRIES,
            normalizer: NormalizerConfig::default(),
        }
    }

    /// Create a test configuration with custom URLs for mock servers.
    ///
    /// Open Library is served under `/openlibrary`, Google Books under `/books/v1`.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            google_api_key: None,
            open_library_url: format!("{}/openlibrary", base_url),
            google_books_url: format!("{}/books/v1", base_url),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_delay: Duration::from_millis(0), // No delay in tests
            cache_ttl: Duration::from_secs(0),          // No caching in tests
            cache_max_size: 0,
            max_retries: 0,
            normalizer: NormalizerConfig::default(),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let google_api_key = std::env::var("GOOGLE_BOOKS_API_KEY").ok().filter(|k| !k.is_empty());
        let mut config = Self::new(google_api_key);

        if let Ok(url) = std::env::var("OPEN_LIBRARY_URL") {
            config.open_library_url = url;
        }
        if let Ok(url) = std::env::var("GOOGLE_BOOKS_URL") {
            config.google_books_url = url;
        }
        if let Ok(ttl) = std::env::var("CATALOG_CACHE_TTL_SECS") {
            config.cache_ttl = Duration::from_secs(ttl.parse()?);
        }

        Ok(config)
    }

    /// Check if a Google Books API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.google_api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
