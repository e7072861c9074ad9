// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// There is a single command: give it a starting directory URL and it prints
// every file and subdirectory URL reachable through the listings below it.
//
//   dirindex-harvest http://10.0.0.5/vendor/ --depth 3
// =============================================================================

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "dirindex-harvest",
    version,
    about = "Print every URL exposed by open directory-listing (autoindex) pages",
    long_about = "dirindex-harvest walks Apache/nginx/lighttpd/dufs style directory listings \
                  breadth-first, starting from a directory URL, and prints each file and \
                  subdirectory URL it finds exactly once. It never leaves the starting host, \
                  and by default never leaves the starting directory."
)]
pub struct Cli {
    /// Starting directory URL (e.g., http://host/vendor/)
    pub url: String,

    /// Maximum recursion depth; the starting directory is depth 0
    ///
    /// Entries of a listing at the maximum depth are still printed,
    /// their subdirectories are just not fetched.
    #[arg(long, default_value_t = 8, env = "DIRINDEX_DEPTH")]
    pub depth: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 8.0, env = "DIRINDEX_TIMEOUT")]
    pub timeout: f64,

    /// Suppress [warn] and [skip] lines on stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Do not deduplicate printed URLs (uses less memory on huge trees)
    #[arg(long)]
    pub no_dedupe: bool,

    /// Only require the same host and port, not the starting path prefix
    #[arg(long)]
    pub origin_only: bool,

    /// Retries for 429/5xx responses and connection failures
    #[arg(long, default_value_t = 2)]
    pub retries: u32,

    /// User-Agent header sent with every request
    #[arg(long, env = "DIRINDEX_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Print one JSON object per line ({"url", "kind", "depth"}) instead of bare URLs
    #[arg(long)]
    pub json: bool,

    /// Show debug traces on stderr (RUST_LOG overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `Option<String>` for user_agent?
//    - None means "not given"; config.rs fills in the default
//    - A default_value here would hide whether the user set it
//
// 2. What does `env = "DIRINDEX_DEPTH"` do?
//    - If --depth is missing, clap reads the environment variable instead
//    - The command-line flag still wins when both are present
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["dirindex-harvest", "http://h/a/"]).unwrap();
        assert_eq!(cli.url, "http://h/a/");
        assert_eq!(cli.depth, 8);
        assert_eq!(cli.timeout, 8.0);
        assert_eq!(cli.retries, 2);
        assert!(!cli.quiet);
        assert!(!cli.no_dedupe);
        assert!(!cli.origin_only);
        assert!(!cli.json);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "dirindex-harvest",
            "https://h/pub/",
            "--depth",
            "0",
            "--timeout",
            "2.5",
            "--quiet",
            "--no-dedupe",
            "--origin-only",
        ])
        .unwrap();
        assert_eq!(cli.depth, 0);
        assert_eq!(cli.timeout, 2.5);
        assert!(cli.quiet && cli.no_dedupe && cli.origin_only);
    }

    #[test]
    fn test_url_is_required() {
        assert!(Cli::try_parse_from(["dirindex-harvest"]).is_err());
    }

    #[test]
    fn test_negative_depth_is_rejected() {
        assert!(Cli::try_parse_from(["dirindex-harvest", "http://h/", "--depth", "-1"]).is_err());
    }
}
