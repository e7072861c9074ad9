// src/crawl/engine.rs
// =============================================================================
// Breadth-first walk over directory listings.
//
// How it works:
// 1. Start with the root directory in a queue at depth 0
// 2. Pop a URL; skip it if already visited, too deep, or out of scope
// 3. Mark it visited *before* fetching, so no URL is ever fetched twice
// 4. Fetch it (redirects followed) and re-check scope on the final URL
// 5. Landed on a file? Print it and stop. Not HTML, or not a listing? Stop.
// 6. Otherwise print every in-scope entry and queue the subdirectories
// 7. Repeat until the queue is empty (or the crawl is cancelled)
//
// The engine owns all crawl state (queue, visited set, printed set), so one
// instance is one crawl. The HTTP client and the output are injected, which
// is what lets the tests below run without a network.
// =============================================================================

use super::scope::Scope;
use super::urls::{is_dir, normalize, normalize_dir, parent_of, resolve};
use crate::config::CrawlConfig;
use crate::fetch::{Fetcher, ListingPage};
use crate::listing::listing_entries;
use crate::output::{EntryKind, Reporter};
use std::collections::{HashSet, VecDeque};
use std::io;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};
use url::Url;

// A directory waiting in the queue
#[derive(Debug, Clone)]
struct CrawlTarget {
    url: Url,
    depth: usize, // how many listing hops from the root
}

/// Counters reported once the crawl ends
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub fetched: usize,
    pub failed: usize,
    pub emitted: usize,
    pub cancelled: bool,
}

pub struct CrawlEngine<F, R> {
    fetcher: F,
    reporter: R,
    scope: Scope,
    max_depth: usize,
    queue: VecDeque<CrawlTarget>,
    visited: HashSet<String>,
    // None when deduplication is turned off
    printed: Option<HashSet<String>>,
    cancel: CancellationToken,
    summary: CrawlSummary,
}

impl<F: Fetcher, R: Reporter> CrawlEngine<F, R> {
    pub fn new(root: &Url, config: &CrawlConfig, fetcher: F, reporter: R) -> Self {
        let root = normalize_dir(root);
        let mut queue = VecDeque::new();
        queue.push_back(CrawlTarget {
            url: root.clone(),
            depth: 0,
        });

        CrawlEngine {
            fetcher,
            reporter,
            scope: Scope::new(&root, config.path_scope),
            max_depth: config.max_depth,
            queue,
            visited: HashSet::new(),
            printed: config.dedupe.then(HashSet::new),
            cancel: CancellationToken::new(),
            summary: CrawlSummary::default(),
        }
    }

    /// Cancelling this token stops the crawl before the next queue item;
    /// a fetch in flight is dropped.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Runs until the queue drains. Fetch failures are reported, not
    /// returned; the only error is the reporter failing to write.
    pub async fn run(&mut self) -> io::Result<CrawlSummary> {
        while let Some(target) = self.queue.pop_front() {
            if self.cancel.is_cancelled() {
                self.summary.cancelled = true;
                break;
            }

            let url = normalize_dir(&target.url);
            if self.visited.contains(url.as_str())
                || target.depth > self.max_depth
                || !self.scope.contains(&url)
            {
                trace!(%url, depth = target.depth, "skipping queued url");
                continue;
            }
            self.visited.insert(url.as_str().to_string());

            debug!(%url, depth = target.depth, "fetching");
            let fetched = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => None,
                result = self.fetcher.fetch(&url) => Some(result),
            };
            let Some(fetched) = fetched else {
                self.summary.cancelled = true;
                break;
            };
            self.summary.fetched += 1;

            match fetched {
                Ok(page) => self.process_page(page, &url, target.depth)?,
                Err(e) => {
                    self.summary.failed += 1;
                    self.reporter.warn(&url, &e);
                }
            }
        }

        Ok(self.summary.clone())
    }

    fn process_page(&mut self, page: ListingPage, requested: &Url, depth: usize) -> io::Result<()> {
        let base = normalize(&page.url);
        debug!(url = %base, status = page.status, "fetched");

        // A redirect may have taken us somewhere we were never meant to go
        if !self.scope.contains(&base) {
            debug!(url = %base, "redirected out of scope");
            self.reporter.skip(&base);
            return Ok(());
        }

        if !is_dir(&base) {
            // The server handed back a file, not an index
            return self.emit(&base, EntryKind::File, depth);
        }

        // A redirect landed on another directory: it counts as visited too,
        // and if it already was, its listing has already been handled
        let here = normalize_dir(&base);
        if here != *requested && !self.visited.insert(here.as_str().to_string()) {
            debug!(url = %here, "redirect target already visited");
            return Ok(());
        }

        if !page.is_html() {
            debug!(url = %base, content_type = ?page.content_type, "not html");
            return Ok(());
        }

        let Some(hrefs) = listing_entries(&page.body) else {
            debug!(url = %base, "not a directory listing");
            return Ok(());
        };

        let parent = parent_of(&base);
        let child_depth = depth + 1;

        for href in hrefs {
            // sort controls and in-page anchors
            if href.starts_with('?') || href.starts_with('#') {
                continue;
            }

            let Some(child) = resolve(&base, &href) else {
                trace!(%href, "unresolvable href");
                continue;
            };

            // "Parent Directory" and self links would just ping-pong
            let as_dir = normalize_dir(&child);
            if as_dir == here || as_dir == parent {
                continue;
            }

            if !self.scope.contains(&child) {
                self.reporter.skip(&child);
                continue;
            }

            if is_dir(&child) {
                self.emit(&child, EntryKind::Dir, child_depth)?;
                if child_depth <= self.max_depth && !self.visited.contains(child.as_str()) {
                    self.queue.push_back(CrawlTarget {
                        url: child,
                        depth: child_depth,
                    });
                }
            } else {
                self.emit(&child, EntryKind::File, child_depth)?;
            }
        }

        Ok(())
    }

    fn emit(&mut self, url: &Url, kind: EntryKind, depth: usize) -> io::Result<()> {
        if let Some(printed) = &mut self.printed {
            if !printed.insert(url.as_str().to_string()) {
                return Ok(());
            }
        }
        self.summary.emitted += 1;
        self.reporter.entry(url, kind, depth)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is `visited` keyed by String and not Url?
//    - Url::as_str() is already the canonical serialization
//    - Storing the string avoids hashing every Url component each lookup
//
// 2. What does `tokio::select!` with `biased;` do?
//    - It polls the branches top to bottom instead of randomly
//    - So cancellation is always noticed before another fetch result
//    - Dropping the losing fetch future aborts that request cleanly
//
// 3. Why `Option<HashSet<String>>` for the printed set?
//    - None means "--no-dedupe": nothing is remembered, lines may repeat
//    - The visited set still exists, so no URL is ever fetched twice
//
// 4. Why is CrawlEngine generic over F and R?
//    - Fetcher and Reporter are traits; the binary plugs in reqwest and
//      stdout, the tests plug in in-memory fakes
//    - Generics (not Box<dyn ...>) mean no allocation or dynamic dispatch
// -----------------------------------------------------------------------------
