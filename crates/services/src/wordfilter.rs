//! Blacklist-term moderation.
//!
//! The word list is a line-oriented external file: `###` starts a trailing
//! comment, a leading `!` is stripped, blank lines are skipped. Surviving
//! terms are escaped and compiled into case-insensitive alternation patterns
//! in shards of at most 200 terms each, so no single pattern grows without
//! bound. A missing or unreadable list means no filter is configured and
//! nothing is flagged.

use once_cell::sync::OnceCell;
use regex::{Regex, RegexBuilder};
use std::path::PathBuf;

const SHARD_SIZE: usize = 200;

enum Source {
    File(PathBuf),
    Terms(Vec<String>),
}

/// Compiled moderation filter. Shards build once, on first use.
pub struct ContentFilter {
    source: Source,
    shards: OnceCell<Vec<Regex>>,
}

impl ContentFilter {
    /// Filter backed by a word-list file.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(path.into()),
            shards: OnceCell::new(),
        }
    }

    /// Filter over an in-memory term list, using the same line rules as the
    /// file form.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source: Source::Terms(terms.into_iter().map(Into::into).collect()),
            shards: OnceCell::new(),
        }
    }

    /// A filter with no terms; flags nothing.
    pub fn disabled() -> Self {
        Self::from_terms(Vec::<String>::new())
    }

    /// True when any blacklisted term occurs anywhere in `text`,
    /// case-insensitively. Short-circuits on the first matching shard.
    pub fn is_flagged(&self, text: &str) -> bool {
        self.shards().iter().any(|shard| shard.is_match(text))
    }

    fn shards(&self) -> &[Regex] {
        self.shards.get_or_init(|| {
            let terms = match &self.source {
                Source::Terms(terms) => parse_terms(terms.iter().map(String::as_str)),
                Source::File(path) => match std::fs::read_to_string(path) {
                    Ok(contents) => parse_terms(contents.lines()),
                    Err(e) => {
                        tracing::warn!(
                            "word list {} unavailable, moderation disabled: {}",
                            path.display(),
                            e
                        );
                        Vec::new()
                    }
                },
            };
            compile_shards(&terms)
        })
    }
}

/// Applies the word-list line rules and escapes each surviving term.
fn parse_terms<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut terms = Vec::new();
    for raw in lines {
        let mut line = match raw.find("###") {
            Some(idx) => &raw[..idx],
            None => raw,
        };
        line = line.trim();
        line = line.strip_prefix('!').unwrap_or(line).trim();
        if !line.is_empty() {
            terms.push(regex::escape(line));
        }
    }
    terms
}

fn compile_shards(terms: &[String]) -> Vec<Regex> {
    let mut shards = Vec::with_capacity(terms.len().div_ceil(SHARD_SIZE));
    for chunk in terms.chunks(SHARD_SIZE) {
        match RegexBuilder::new(&format!("(?:{})", chunk.join("|")))
            .case_insensitive(true)
            .build()
        {
            Ok(shard) => shards.push(shard),
            Err(e) => tracing::error!("moderation shard failed to compile: {}", e),
        }
    }
    shards
}
