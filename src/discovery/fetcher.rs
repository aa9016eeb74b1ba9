//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made during discovery:
//! - Building HTTP clients with the configured user agent and timeout
//! - Attaching the optional Cookie header
//! - Capping the number of requests in flight across a run
//!
//! There is no retry logic. A failed request is reported as
//! [`FetchResult::Failed`] and reads as an empty body to callers.

use crate::config::RequestConfig;
use reqwest::header::COOKIE;
use reqwest::{redirect::Policy, Client};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Result of a fetch operation
#[derive(Debug, Clone)]
pub enum FetchResult {
    /// The server answered, whatever the status
    Response {
        /// HTTP status code
        status_code: u16,
        /// Response body decoded as text
        body: String,
    },

    /// Timeout, connection refused, DNS failure or an unreadable body
    Failed {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Body text; empty for failed requests
    pub fn body(&self) -> &str {
        match self {
            Self::Response { body, .. } => body,
            Self::Failed { .. } => "",
        }
    }

    /// Status code of a completed response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Response { status_code, .. } => Some(*status_code),
            Self::Failed { .. } => None,
        }
    }

    /// True when there is no body to work with
    pub fn is_empty(&self) -> bool {
        self.body().is_empty()
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are not followed so that 301/302 answers stay visible to the
/// classifier.
///
/// # Example
///
/// ```no_run
/// use burrow::config::RequestConfig;
/// use burrow::discovery::build_http_client;
///
/// let client = build_http_client(&RequestConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &RequestConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .connect_timeout(config.timeout())
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues a single GET request
///
/// Any completed response (2xx through 5xx alike) yields its status and body.
/// Transport errors never escape: they become [`FetchResult::Failed`].
pub async fn fetch_url(client: &Client, url: &str, cookies: Option<&str>) -> FetchResult {
    let mut request = client.get(url);
    if let Some(cookies) = cookies {
        request = request.header(COOKIE, cookies);
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            tracing::debug!("GET {} failed: {}", url, error);
            return FetchResult::Failed { error };
        }
    };

    let status_code = response.status().as_u16();
    match response.text().await {
        Ok(body) => {
            tracing::trace!("GET {} -> {} ({} bytes)", url, status_code, body.len());
            FetchResult::Response { status_code, body }
        }
        Err(e) => {
            tracing::debug!("GET {} body read failed: {}", url, e);
            FetchResult::Failed {
                error: e.to_string(),
            }
        }
    }
}

/// Shared request handle for one run
///
/// Cloning is cheap; every clone shares the same connection pool and the same
/// concurrency ceiling. A permit is held only while a single request is in
/// flight, so callers may wait on other fetches without starving the pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    cookies: Option<String>,
    permits: Arc<Semaphore>,
}

impl Fetcher {
    /// Creates a fetcher from request settings and a concurrency ceiling
    pub fn new(config: &RequestConfig, max_concurrent_requests: usize) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            cookies: config.cookies.clone(),
            permits: Arc::new(Semaphore::new(max_concurrent_requests.max(1))),
        })
    }

    /// Fetches `url`, waiting for a free slot under the concurrency ceiling
    pub async fn fetch(&self, url: &str) -> FetchResult {
        let _permit = match self.permits.acquire().await {
            Ok(permit) => permit,
            Err(e) => {
                return FetchResult::Failed {
                    error: e.to_string(),
                }
            }
        };

        fetch_url(&self.client, url, self.cookies.as_deref()).await
    }
}
