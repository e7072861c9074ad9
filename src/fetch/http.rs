// src/fetch/http.rs
// =============================================================================
// Fetches pages over HTTP with reqwest.
//
// - GET only, redirects followed (up to max_redirects)
// - the final URL is reported so the engine can re-check scope
// - 429/500/502/503/504, timeouts and connection failures are retried with
//   exponential backoff: backoff, 2*backoff, 4*backoff, ...
// - any other non-2xx status is an error straight away
// =============================================================================

use super::{Fetcher, ListingPage};
use crate::config::CrawlConfig;
use crate::crawl::urls::is_dir;
use crate::error::FetchError;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

/// Reusable HTTP fetcher. The inner Client pools connections.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    retries: u32,
    backoff: Duration,
}

impl HttpFetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(HttpFetcher {
            client,
            retries: config.retries,
            backoff: config.backoff,
        })
    }

    async fn fetch_once(&self, url: &Url) -> Result<ListingPage, FetchError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let page = ListingPage {
            url: final_url,
            status: status.as_u16(),
            content_type,
            body: String::new(),
        };

        // Landing on a file or a non-HTML response ends processing for this
        // URL, so don't download what might be a multi-gigabyte file.
        if !is_dir(&page.url) || !page.is_html() {
            trace!(url = %page.url, "not reading body");
            return Ok(page);
        }

        // text() decodes with the charset from Content-Type, UTF-8 otherwise
        let body = response.text().await?;
        Ok(ListingPage { body, ..page })
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(1u32 << attempt.saturating_sub(1).min(16))
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<ListingPage, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(url).await {
                Ok(page) => return Ok(page),
                Err(e) if e.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    let delay = self.delay_for(attempt);
                    debug!(%url, attempt, error = %e, ?delay, "retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher(retries: u32) -> HttpFetcher {
        let config = CrawlConfig {
            retries,
            backoff: Duration::from_millis(5),
            timeout: Duration::from_secs(5),
            ..CrawlConfig::default()
        };
        HttpFetcher::new(&config).expect("client should build")
    }

    fn at(server: &MockServer, p: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), p)).unwrap()
    }

    #[test]
    fn test_backoff_doubles() {
        let f = fetcher(3);
        assert_eq!(f.delay_for(1), Duration::from_millis(5));
        assert_eq!(f.delay_for(2), Duration::from_millis(10));
        assert_eq!(f.delay_for(3), Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_fetch_listing_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<title>Index of /a/</title>".as_bytes().to_vec(), "text/html"),
            )
            .mount(&server)
            .await;

        let page = fetcher(0).fetch(&at(&server, "/a/")).await.unwrap();
        assert_eq!(page.status, 200);
        assert_eq!(page.url, at(&server, "/a/"));
        assert_eq!(page.content_type.as_deref(), Some("text/html"));
        assert!(page.body.contains("Index of"));
    }

    #[tokio::test]
    async fn test_retries_transient_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flaky/"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flaky/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(b"ok".to_vec(), "text/html"))
            .expect(1)
            .mount(&server)
            .await;

        let page = fetcher(2).fetch(&at(&server, "/flaky/")).await.unwrap();
        assert_eq!(page.body, "ok");
    }

    #[tokio::test]
    async fn test_gives_up_after_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/down/"))
            .respond_with(ResponseTemplate::new(502))
            .expect(3)
            .mount(&server)
            .await;

        let err = fetcher(2).fetch(&at(&server, "/down/")).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(502)));
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing/"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = fetcher(2).fetch(&at(&server, "/missing/")).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(404)));
        assert_eq!(err.kind(), "HTTPError");
    }

    #[tokio::test]
    async fn test_redirect_reports_final_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old/"))
            .respond_with(ResponseTemplate::new(301).insert_header("Location", "/new/"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(b"<pre></pre>".to_vec(), "text/html"))
            .mount(&server)
            .await;

        let page = fetcher(0).fetch(&at(&server, "/old/")).await.unwrap();
        assert_eq!(page.url, at(&server, "/new/"));
    }

    #[tokio::test]
    async fn test_file_body_is_not_downloaded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dir/"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", "/dir/blob.bin"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dir/blob.bin"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(vec![0u8; 4096], "application/octet-stream"),
            )
            .mount(&server)
            .await;

        let page = fetcher(0).fetch(&at(&server, "/dir/")).await.unwrap();
        assert_eq!(page.url, at(&server, "/dir/blob.bin"));
        assert!(page.body.is_empty());
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop a listener so the port is (very likely) closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let url = Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap();

        let err = fetcher(0).fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Connect(_)));
    }
}
