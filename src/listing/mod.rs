// src/listing/mod.rs
// =============================================================================
// HTML side of the crawler: recognising directory listings and pulling their
// entries out. Both halves are pure functions of the HTML text, no network.
//
// Submodules:
// - classify: "is this a directory listing?"
// - anchors:  "which links on it are entries?"
// =============================================================================

mod anchors;
mod classify;

use scraper::Html;

pub use anchors::{anchors_in_document, extract_anchors};
pub use classify::{is_listing_document, looks_like_index};

/// Parses the page once and returns its entry hrefs, or None when the page
/// is not a directory listing.
pub fn listing_entries(html: &str) -> Option<Vec<String>> {
    let document = Html::parse_document(html);
    if !is_listing_document(&document) {
        return None;
    }
    Some(anchors_in_document(&document))
}
