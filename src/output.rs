// src/output.rs
// =============================================================================
// Where discovered URLs and diagnostics go.
//
// stdout carries nothing but results, one per line, flushed immediately so
// the output can be piped into other tools while the crawl is still running.
// stderr carries the human-facing diagnostics:
//   [warn] <url> -> <Kind>: <detail>
//   [skip] out-of-scope: <url>
// =============================================================================

use crate::error::FetchError;
use serde::Serialize;
use std::io::{self, Write};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Dir,
    File,
}

/// One line of --json output
#[derive(Debug, Serialize)]
struct EntryRecord<'a> {
    url: &'a str,
    kind: EntryKind,
    depth: usize,
}

pub trait Reporter {
    /// A discovered URL. An Err stops the crawl (e.g. stdout was closed).
    fn entry(&mut self, url: &Url, kind: EntryKind, depth: usize) -> io::Result<()>;

    /// A fetch that failed; the crawl carries on without it
    fn warn(&mut self, url: &Url, error: &FetchError);

    /// A URL that was found but lies outside the crawl scope
    fn skip(&mut self, url: &Url);
}

/// Writes results to stdout and diagnostics to stderr
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    quiet: bool,
    json: bool,
}

impl ConsoleReporter {
    pub fn new(quiet: bool, json: bool) -> Self {
        ConsoleReporter { quiet, json }
    }
}

impl Reporter for ConsoleReporter {
    fn entry(&mut self, url: &Url, kind: EntryKind, depth: usize) -> io::Result<()> {
        let mut out = io::stdout().lock();
        write_entry(&mut out, self.json, url, kind, depth)?;
        out.flush()
    }

    fn warn(&mut self, url: &Url, error: &FetchError) {
        if !self.quiet {
            eprintln!("[warn] {} -> {}: {}", url, error.kind(), error);
        }
    }

    fn skip(&mut self, url: &Url) {
        if !self.quiet {
            eprintln!("[skip] out-of-scope: {}", url);
        }
    }
}

fn write_entry(
    out: &mut impl Write,
    json: bool,
    url: &Url,
    kind: EntryKind,
    depth: usize,
) -> io::Result<()> {
    if json {
        let record = EntryRecord {
            url: url.as_str(),
            kind,
            depth,
        };
        serde_json::to_writer(&mut *out, &record)?;
        writeln!(out)
    } else {
        writeln!(out, "{}", url)
    }
}

/// Keeps everything in memory; used by the engine tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryReporter {
    pub entries: Vec<(String, EntryKind, usize)>,
    pub warnings: Vec<String>,
    pub skipped: Vec<String>,
}

#[cfg(test)]
impl MemoryReporter {
    pub fn urls(&self) -> Vec<&str> {
        self.entries.iter().map(|(url, _, _)| url.as_str()).collect()
    }
}

#[cfg(test)]
impl Reporter for MemoryReporter {
    fn entry(&mut self, url: &Url, kind: EntryKind, depth: usize) -> io::Result<()> {
        self.entries.push((url.to_string(), kind, depth));
        Ok(())
    }

    fn warn(&mut self, url: &Url, error: &FetchError) {
        self.warnings
            .push(format!("[warn] {} -> {}: {}", url, error.kind(), error));
    }

    fn skip(&mut self, url: &Url) {
        self.skipped.push(url.to_string());
    }
}
