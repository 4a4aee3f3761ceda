//! Error types for the book catalog server.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! The normalizer has no error type: malformed catalog data degrades to defaults.

use std::time::Duration;

/// Failures talking to Open Library or Google Books.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// Connection, DNS or TLS failure.
    #[error("catalog unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure surfaced by the retry middleware.
    #[error("catalog request failed: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// 429 from the catalog.
    #[error("catalog rate limit hit, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    /// 404 from the catalog.
    #[error("catalog returned 404: {resource}")]
    NotFound { resource: String },

    /// 400 from the catalog, usually a malformed query.
    #[error("catalog rejected the query: {message}")]
    BadRequest { message: String },

    #[error("catalog did not answer within {0:?}")]
    Timeout(Duration),

    /// Body was not JSON at all. Merely odd JSON is the normalizer's problem.
    #[error("catalog response is not JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("unexpected catalog status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },
}

impl ClientError {
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Wait suggested by a 429's `Retry-After`.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }

    /// Status reported by the REST endpoint: upstream 4xx pass through,
    /// timeouts are 504, every other upstream failure is 502.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::RateLimited { .. } => 429,
            Self::NotFound { .. } => 404,
            Self::BadRequest { .. } => 400,
            Self::Timeout(_) => 504,
            _ => 502,
        }
    }
}

/// Errors returned by tools and the REST endpoint.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Caller input rejected before any catalog was contacted.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Arguments did not deserialize, or output failed to serialize.
    #[error("malformed arguments: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Message shown to the MCP client or REST caller.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            Self::Client(err) => match err.retry_after() {
                Some(wait) => format!(
                    "Rate limited by the book catalog. Please wait {}s before retrying.",
                    wait.as_secs()
                ),
                None => match err {
                    ClientError::NotFound { .. } => {
                        "The book catalog has no such resource.".to_string()
                    }
                    ClientError::Timeout(after) => {
                        format!("The book catalog did not answer within {}s.", after.as_secs())
                    }
                    other => format!("Book catalog error: {other}"),
                },
            },
            Self::Serialization(err) => format!("Malformed arguments: {err}"),
        }
    }

    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Client(err) => err.status_code(),
            Self::Validation { .. } | Self::Serialization(_) => 400,
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;
