// src/crawl/mod.rs
// =============================================================================
// Directory-listing crawl.
//
// Submodules:
// - urls:   canonical forms of URLs and directory URLs
// - scope:  which URLs we are allowed to visit or print
// - engine: the breadth-first loop tying fetching, parsing and output together
// =============================================================================

mod engine;
pub mod scope;
pub mod urls;

pub use engine::{CrawlEngine, CrawlSummary};
pub use scope::Scope;
