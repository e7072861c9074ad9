// src/error.rs
// =============================================================================
// Errors produced while fetching a listing page.
//
// None of these are fatal. The crawl engine catches every FetchError, prints
// a `[warn] <url> -> <Kind>: <detail>` line and moves on to the next URL.
// Startup problems (a bad starting URL) use anyhow in main.rs instead.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The request (or reading the body) exceeded the per-request timeout
    #[error("request timed out")]
    Timeout,

    /// DNS failure, refused connection, TLS handshake failure, ...
    #[error("connection failed: {0}")]
    Connect(String),

    /// The redirect chain was longer than the configured limit
    #[error("too many redirects")]
    TooManyRedirects,

    /// A non-2xx status, after any retries were used up
    #[error("HTTP {0}")]
    Status(u16),

    /// The response arrived but the body could not be read or decoded
    #[error("failed to read body: {0}")]
    Body(String),

    /// Anything else reqwest reports (builder errors, invalid URLs, ...)
    #[error("{0}")]
    Request(String),
}

impl FetchError {
    /// Short, stable name used in the `[warn]` line
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Timeout => "Timeout",
            FetchError::Connect(_) => "ConnectionError",
            FetchError::TooManyRedirects => "TooManyRedirects",
            FetchError::Status(_) => "HTTPError",
            FetchError::Body(_) => "BodyError",
            FetchError::Request(_) => "RequestError",
        }
    }

    /// Whether another attempt might succeed
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Timeout | FetchError::Connect(_) => true,
            FetchError::Status(code) => is_retryable_status(*code),
            _ => false,
        }
    }
}

// Statuses worth retrying: rate limiting and flaky upstreams
pub fn is_retryable_status(code: u16) -> bool {
    matches!(code, 429 | 500 | 502 | 503 | 504)
}

// Sorts a reqwest error into one of our variants.
// Same idea as checking is_timeout()/is_redirect()/is_connect() in order.
impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else if error.is_redirect() {
            FetchError::TooManyRedirects
        } else if error.is_connect() {
            FetchError::Connect(error.to_string())
        } else if let Some(status) = error.status() {
            FetchError::Status(status.as_u16())
        } else if error.is_body() || error.is_decode() {
            FetchError::Body(error.to_string())
        } else {
            FetchError::Request(error.to_string())
        }
    }
}
