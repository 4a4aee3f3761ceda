//! HTTP client construction: default headers, timeouts, pooling and retry.

use std::time::Duration;

use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, api};

/// User agent sent to both catalogs (Open Library asks clients to identify themselves).
pub const USER_AGENT: &str = concat!("book-catalog-mcp/", env!("CARGO_PKG_VERSION"));

/// Build the reqwest client wrapped in transient-failure retry middleware.
pub fn build(config: &Config) -> anyhow::Result<ClientWithMiddleware> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(reqwest::header::ACCEPT, "application/json".parse()?);
    headers.insert(reqwest::header::USER_AGENT, USER_AGENT.parse()?);

    let client = Client::builder()
        .default_headers(headers)
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .pool_max_idle_per_host(api::MAX_KEEPALIVE)
        .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
        .gzip(true)
        .build()?;

    let retry_policy = ExponentialBackoff::builder()
        .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
        .build_with_max_retries(config.max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}
