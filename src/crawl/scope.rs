// src/crawl/scope.rs
// =============================================================================
// Decides which URLs the crawl is allowed to touch.
//
// The scope is computed once from the starting URL and never changes:
// - origin: host + effective port (always enforced)
// - prefix: the starting directory's path (enforced unless --origin-only)
//
// With the prefix enforced, `http://h/a/` can never wander into `http://h/b/`,
// not even through a crafted `../../b/` link or a redirect.
// =============================================================================

use super::urls::{host_port, normalize, normalize_dir};
use url::Url;

#[derive(Debug, Clone)]
pub struct Scope {
    origin: (String, Option<u16>),
    prefix: Option<String>,
}

impl Scope {
    /// Builds the scope from the (already directory-normalized) root URL
    pub fn new(root: &Url, enforce_path: bool) -> Self {
        let root = normalize_dir(root);
        Scope {
            origin: host_port(&root),
            prefix: enforce_path.then(|| root.path().to_string()),
        }
    }

    pub fn same_origin(&self, candidate: &Url) -> bool {
        host_port(candidate) == self.origin
    }

    pub fn contains(&self, candidate: &Url) -> bool {
        if !self.same_origin(candidate) {
            return false;
        }
        match &self.prefix {
            Some(prefix) => normalize(candidate).path().starts_with(prefix.as_str()),
            None => true,
        }
    }
}
