//! HTTP fetcher with a hard size ceiling
//!
//! The fetcher issues plain GETs under a fixed client identity and accumulates
//! the body chunk by chunk so an oversized response can be abandoned
//! mid-transfer. It does not judge HTTP statuses: any response that completes
//! within the size budget is handed back, and callers apply the `status < 300`
//! success rule.

use crate::FetchError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// A completed HTTP response, body fully buffered
#[derive(Debug)]
pub struct FetchedResource {
    /// HTTP status code
    pub status: StatusCode,

    /// Response headers
    pub headers: HeaderMap,

    /// Full response body
    pub body: Vec<u8>,
}

impl FetchedResource {
    /// The caller-side success rule: any status below 300
    pub fn is_success(&self) -> bool {
        self.status.as_u16() < 300
    }
}

/// Builds the HTTP client used for every fetch
///
/// The client carries a fixed `linkharvest/<version>` user agent and a blanket
/// `Accept` header. Redirects follow reqwest's default policy; the crawler
/// adds no redirect handling of its own.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

    Client::builder()
        .user_agent(concat!("linkharvest/", env!("CARGO_PKG_VERSION")))
        .default_headers(headers)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, enforcing a byte ceiling on the response body
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `max_bytes` - Hard ceiling on accumulated body size
///
/// # Returns
///
/// * `Ok(FetchedResource)` - Response completed within the ceiling; the
///   status may still be non-2xx
/// * `Err(FetchError::SizeExceeded)` - Body grew past `max_bytes`; the
///   transfer is dropped and no partial body is returned
/// * `Err(FetchError::Transport)` - DNS, connect, timeout, or read failure
pub async fn fetch(
    client: &Client,
    url: &Url,
    max_bytes: usize,
) -> Result<FetchedResource, FetchError> {
    let mut response =
        client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

    let status = response.status();
    let headers = response.headers().clone();

    let mut body: Vec<u8> = Vec::new();
    loop {
        let chunk = response
            .chunk()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        match chunk {
            Some(bytes) => {
                if body.len() + bytes.len() > max_bytes {
                    // Dropping the response aborts the in-flight transfer
                    return Err(FetchError::SizeExceeded {
                        url: url.to_string(),
                        limit: max_bytes,
                    });
                }
                body.extend_from_slice(&bytes);
            }
            None => break,
        }
    }

    Ok(FetchedResource {
        status,
        headers,
        body,
    })
}
