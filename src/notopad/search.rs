//! Find and replace over a text buffer.
//!
//! Queries are always literal; the options only control case folding and whether
//! matches must sit on word boundaries.

use crate::error::{NotopadError, Result};
use regex::{NoExpand, Regex, RegexBuilder};
use std::ops::Range;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub match_case: bool,
    pub whole_word: bool,
}

/// A single hit. `range` is in bytes; `line` and `column` are 1-based and count
/// characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub range: Range<usize>,
    pub line: usize,
    pub column: usize,
}

/// Compiled literal query.
#[derive(Debug, Clone)]
pub struct Query {
    regex: Regex,
}

impl Query {
    /// Returns `None` for an empty query.
    pub fn new(query: &str, opts: SearchOptions) -> Result<Option<Self>> {
        if query.is_empty() {
            return Ok(None);
        }
        let escaped = regex::escape(query);
        let pattern = if opts.whole_word {
            format!(r"\b{}\b", escaped)
        } else {
            escaped
        };
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(!opts.match_case)
            .build()
            .map_err(|e| NotopadError::Api(format!("Invalid search: {}", e)))?;
        Ok(Some(Self { regex }))
    }

    pub fn find_next(&self, text: &str, from: usize) -> Option<Match> {
        let from = floor_char_boundary(text, from);
        self.regex
            .find_at(text, from)
            .map(|m| locate(text, m.range()))
    }

    pub fn find_all(&self, text: &str) -> Vec<Match> {
        self.regex
            .find_iter(text)
            .map(|m| locate(text, m.range()))
            .collect()
    }

    /// Replace every occurrence with the literal `replacement`.
    pub fn replace_all(&self, text: &str, replacement: &str) -> (String, usize) {
        let count = self.regex.find_iter(text).count();
        if count == 0 {
            return (text.to_string(), 0);
        }
        let replaced = self.regex.replace_all(text, NoExpand(replacement));
        (replaced.into_owned(), count)
    }
}

pub fn find_next(
    text: &str,
    query: &str,
    from: usize,
    opts: SearchOptions,
) -> Result<Option<Match>> {
    Ok(Query::new(query, opts)?.and_then(|q| q.find_next(text, from)))
}

pub fn find_all(text: &str, query: &str, opts: SearchOptions) -> Result<Vec<Match>> {
    Ok(Query::new(query, opts)?
        .map(|q| q.find_all(text))
        .unwrap_or_default())
}

pub fn replace_all(
    text: &str,
    query: &str,
    replacement: &str,
    opts: SearchOptions,
) -> Result<(String, usize)> {
    Ok(match Query::new(query, opts)? {
        Some(q) => q.replace_all(text, replacement),
        None => (text.to_string(), 0),
    })
}

/// Replace a single previously found match.
pub fn replace_match(text: &str, found: &Match, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..found.range.start]);
    out.push_str(replacement);
    out.push_str(&text[found.range.end..]);
    out
}

fn locate(text: &str, range: Range<usize>) -> Match {
    let before = &text[..range.start];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = text[line_start..range.start].chars().count() + 1;
    Match {
        range,
        line,
        column,
    }
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
