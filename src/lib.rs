// src/lib.rs
// =============================================================================
// dirindex-harvest: list every URL behind open directory-listing pages.
//
// The binary (main.rs) is a thin wrapper; everything it needs lives here so
// the listing heuristics and the crawl engine can be used and tested on
// their own.
// =============================================================================

pub mod cli;
pub mod config;
pub mod crawl;
pub mod error;
pub mod fetch;
pub mod listing;
pub mod output;
