// src/crawl/urls.rs
// =============================================================================
// URL canonicalization.
//
// Every URL that goes into the visited set, the printed set or the queue is
// passed through one of these functions first, so that `http://h//a/#top`
// and `http://h/a/` end up as the same key.
//
// Two flavours:
// - normalize():     collapse `//` runs in the path, drop the fragment,
//                    keep the query (file links like `x.php?id=1` are real)
// - normalize_dir(): same, but also drop the query and force a trailing `/`
// =============================================================================

use url::Url;

/// Collapses repeated slashes in the path and drops the fragment.
pub fn normalize(url: &Url) -> Url {
    let mut out = url.clone();
    out.set_fragment(None);
    if !out.cannot_be_a_base() {
        let path = collapse_slashes(out.path());
        out.set_path(&path);
    }
    out
}

/// Canonical form of a URL treated as a directory.
pub fn normalize_dir(url: &Url) -> Url {
    let mut out = normalize(url);
    out.set_query(None);
    if !out.cannot_be_a_base() && !out.path().ends_with('/') {
        let path = format!("{}/", out.path());
        out.set_path(&path);
    }
    out
}

/// Lower-cased host plus the effective port.
///
/// `http://h/` and `http://h:80/` compare equal. Schemes other than http and
/// https have no default port here.
pub fn host_port(url: &Url) -> (String, Option<u16>) {
    let host = url.host_str().unwrap_or("").to_ascii_lowercase();
    let port = url.port().or(match url.scheme() {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    });
    (host, port)
}

/// The directory one level up, as a canonical directory URL.
pub fn parent_of(url: &Url) -> Url {
    match url.join("../") {
        Ok(parent) => normalize_dir(&parent),
        Err(_) => normalize_dir(url),
    }
}

/// Resolves an href from a listing against the page it was found on.
pub fn resolve(base: &Url, href: &str) -> Option<Url> {
    base.join(href.trim()).ok().map(|u| normalize(&u))
}

/// A directory entry ends in `/` and carries no query string.
pub fn is_dir(url: &Url) -> bool {
    url.path().ends_with('/') && url.query().is_none()
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_was_slash = false;

    for c in path.chars() {
        if c == '/' {
            if previous_was_slash {
                continue;
            }
            previous_was_slash = true;
        } else {
            previous_was_slash = false;
        }
        out.push(c);
    }

    if out.is_empty() {
        out.push('/');
    }
    out
}
