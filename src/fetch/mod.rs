// src/fetch/mod.rs
// =============================================================================
// The HTTP side of the crawler.
//
// The crawl engine only talks to the `Fetcher` trait, so tests can hand it an
// in-memory fake instead of a real server. `HttpFetcher` (http.rs) is the
// reqwest-backed implementation used by the binary.
// =============================================================================

mod http;

use crate::error::FetchError;
use std::future::Future;
use url::Url;

pub use http::HttpFetcher;

/// One fetched page, after redirects were followed
#[derive(Debug, Clone)]
pub struct ListingPage {
    /// Final URL (post-redirect)
    pub url: Url,
    pub status: u16,
    pub content_type: Option<String>,
    /// Decoded text body. Left empty when the response was clearly not a
    /// listing (a file download, or a non-HTML Content-Type).
    pub body: String,
}

impl ListingPage {
    /// A missing Content-Type is given the benefit of the doubt
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map_or(true, |ct| ct.to_ascii_lowercase().contains("html"))
    }
}

pub trait Fetcher {
    /// GET `url`, following redirects. Non-2xx responses are errors.
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<ListingPage, FetchError>>;
}
