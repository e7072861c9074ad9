// src/config.rs
// =============================================================================
// Crawl settings.
//
// Everything comes from the command line (or a DIRINDEX_* env var via clap);
// there is no config file. CrawlConfig::default() matches the CLI defaults so
// tests can build one without going through clap.
// =============================================================================

use crate::cli::Cli;
use anyhow::{anyhow, bail, Context, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = concat!("dirindex-harvest/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Deepest level whose listing is fetched (root = 0)
    pub max_depth: usize,
    /// Per-request timeout
    pub timeout: Duration,
    /// Extra attempts for transient failures
    pub retries: u32,
    /// Delay before the first retry, doubled for each one after
    pub backoff: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
    /// Skip URLs that were already printed
    pub dedupe: bool,
    /// Require discovered URLs to stay under the starting path
    pub path_scope: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        CrawlConfig {
            max_depth: 8,
            timeout: Duration::from_secs(8),
            retries: 2,
            backoff: Duration::from_millis(300),
            max_redirects: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            dedupe: true,
            path_scope: true,
        }
    }
}

impl CrawlConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        if !cli.timeout.is_finite() || cli.timeout <= 0.0 {
            bail!("--timeout must be a positive number of seconds, got {}", cli.timeout);
        }

        Ok(CrawlConfig {
            max_depth: cli.depth,
            timeout: Duration::from_secs_f64(cli.timeout),
            retries: cli.retries,
            user_agent: cli
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            dedupe: !cli.no_dedupe,
            path_scope: !cli.origin_only,
            ..CrawlConfig::default()
        })
    }
}

/// Validates the starting URL before any request is made
pub fn parse_start_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid URL '{}'", raw))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        bail!("Unsupported scheme '{}' in '{}': only http and https are crawled", url.scheme(), raw);
    }
    url.host_str()
        .ok_or_else(|| anyhow!("URL has no host: {}", raw))?;

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli_maps_flags() {
        let cli = Cli::parse_from([
            "dirindex-harvest",
            "http://h/",
            "--depth",
            "3",
            "--timeout",
            "1.5",
            "--no-dedupe",
            "--origin-only",
            "--user-agent",
            "probe/1",
        ]);
        let config = CrawlConfig::from_cli(&cli).unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert!(!config.dedupe);
        assert!(!config.path_scope);
        assert_eq!(config.user_agent, "probe/1");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let cli = Cli::parse_from(["dirindex-harvest", "http://h/", "--timeout", "0"]);
        assert!(CrawlConfig::from_cli(&cli).is_err());
    }

    #[test]
    fn test_parse_start_url() {
        assert!(parse_start_url("http://10.0.0.5/vendor/").is_ok());
        assert!(parse_start_url("https://h").is_ok());
        assert!(parse_start_url("not a url").is_err());
        assert!(parse_start_url("ftp://h/pub/").is_err());
        assert!(parse_start_url("/relative/path/").is_err());
    }
}
