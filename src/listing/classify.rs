// src/listing/classify.rs
// =============================================================================
// Answers one question: "is this HTML page a directory listing?"
//
// Servers format their autoindex pages differently, so we try a handful of
// cheap heuristics in order and stop at the first one that matches:
//
// 1. <title>Index of /foo</title>                   (Apache, nginx, lighttpd)
// 2. <h1>Index of /foo</h1> (any heading level)
// 3. <pre> with a "Name   Last modified" header     (Apache fancy, dufs)
// 4. a <th> whose text is exactly "Name"            (Apache table mode)
// 5. a <table> with a "Name" header cell plus a "Size" or "Modified" one
//                                                   (custom table UIs)
//
// A page that matches none of these is treated as ordinary content and the
// crawler stops descending there.
// =============================================================================

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

// These selectors are constants; if one failed to parse it would be a typo
// caught by the first test run.
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").expect("title selector"));
static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").expect("heading selector"));
static PRE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("pre").expect("pre selector"));
static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").expect("table selector"));
static HEADER_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").expect("th selector"));

static PRE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bName\s+Last\s+modified\b").expect("pre header regex"));

/// Returns true when the HTML looks like a server-generated directory listing
pub fn looks_like_index(html: &str) -> bool {
    is_listing_document(&Html::parse_document(html))
}

/// Same as `looks_like_index`, for a document that is already parsed
pub fn is_listing_document(document: &Html) -> bool {
    title_says_index_of(document)
        || heading_says_index_of(document)
        || pre_has_listing_header(document)
        || has_exact_name_header(document)
        || table_has_listing_columns(document)
}

fn title_says_index_of(document: &Html) -> bool {
    document
        .select(&TITLE)
        .any(|title| starts_with_index_of(&text_of(title)))
}

fn heading_says_index_of(document: &Html) -> bool {
    document
        .select(&HEADING)
        .any(|heading| starts_with_index_of(&text_of(heading)))
}

fn pre_has_listing_header(document: &Html) -> bool {
    // text_of() concatenates across child tags, so
    // `<a>Name</a>   <a>Last modified</a>` still matches
    document
        .select(&PRE)
        .any(|pre| PRE_HEADER.is_match(&text_of(pre)))
}

fn has_exact_name_header(document: &Html) -> bool {
    document
        .select(&HEADER_CELL)
        .any(|th| text_of(th).trim().eq_ignore_ascii_case("name"))
}

fn table_has_listing_columns(document: &Html) -> bool {
    if document.select(&TABLE).next().is_none() {
        return false;
    }

    let headers: Vec<String> = document
        .select(&HEADER_CELL)
        .map(|th| text_of(th).to_lowercase())
        .collect();

    let has_name = headers.iter().any(|h| h.contains("name"));
    let has_size_or_date = headers
        .iter()
        .any(|h| h.contains("size") || h.contains("modified"));

    has_name && has_size_or_date
}

// "Index of" as a whole phrase at the start, ignoring case and leading spaces
fn starts_with_index_of(text: &str) -> bool {
    let text = text.trim_start();
    let Some(head) = text.get(..8) else {
        return false;
    };
    if !head.eq_ignore_ascii_case("index of") {
        return false;
    }
    !text[8..].starts_with(|c: char| c.is_alphanumeric() || c == '_')
}

fn text_of(element: ElementRef) -> String {
    element.text().collect()
}
