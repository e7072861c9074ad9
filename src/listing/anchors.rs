// src/listing/anchors.rs
// =============================================================================
// Pulls the entry links out of a listing page.
//
// Listing pages mix real entries with navigation chrome (breadcrumbs, "home"
// links, sort controls in a <thead>). Most layouts put the real entries in
// one of two places:
// - <pre>    nginx, lighttpd, dufs and Apache's "fancy" mode
// - <tbody>  table-based UIs, with navigation kept in <thead>
//
// So every <a href> is collected twice: once into `all`, and once into
// `strict` when it sits inside a <pre> or <tbody>. If `strict` found anything
// it wins, otherwise we fall back to `all`.
//
// Order is document order. Nothing is deduplicated here; the crawl engine
// owns that decision.
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector"));

/// Returns the href values that look like listing entries
pub fn extract_anchors(html: &str) -> Vec<String> {
    anchors_in_document(&Html::parse_document(html))
}

/// Same as `extract_anchors`, for a document that is already parsed
pub fn anchors_in_document(document: &Html) -> Vec<String> {
    let mut all = Vec::new();
    let mut strict = Vec::new();

    for anchor in document.select(&ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() {
            continue;
        }

        if in_listing_region(anchor) {
            strict.push(href.to_string());
        }
        all.push(href.to_string());
    }

    if strict.is_empty() {
        all
    } else {
        strict
    }
}

// True if any ancestor is a <pre> or a <tbody>.
// html5ever inserts an implicit <tbody> into every <table>, so anchors in
// Apache's bare table layout always count as strict; the fallback to `all`
// only kicks in when no anchor sits inside a <pre> or a table.
fn in_listing_region(anchor: ElementRef) -> bool {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|parent| matches!(parent.value().name(), "pre" | "tbody"))
}
