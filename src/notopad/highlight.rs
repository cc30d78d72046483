//! Pattern-based highlighting for Python sources.
//!
//! This is a single regex pass, not a tokenizer: strings are single-line
//! literals, comments run to end of line, and keywords are matched on word
//! boundaries outside of both.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use std::path::Path;

pub const PYTHON_KEYWORDS: &[&str] = &[
    "def", "class", "if", "elif", "else", "for", "while", "try", "except", "finally", "import",
    "from", "as", "return", "yield", "lambda", "with", "assert", "break", "continue", "pass",
    "raise", "and", "or", "not", "in", "is", "True", "False", "None",
];

static KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    let alternatives = PYTHON_KEYWORDS.join("|");
    Regex::new(&format!(r"\b(?:{})\b", alternatives)).expect("keyword pattern is valid")
});

static STRING_OR_COMMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"#[^\n]*|"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'"#)
        .expect("string/comment pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    String,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: Range<usize>,
}

/// Only `.py` files get highlighted.
pub fn is_highlightable(path: Option<&Path>) -> bool {
    path.and_then(Path::extension)
        .map(|ext| ext == "py")
        .unwrap_or(false)
}

/// Tokens sorted by start offset. Keywords inside strings or comments are not
/// reported.
pub fn highlight(text: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = STRING_OR_COMMENT_RE
        .find_iter(text)
        .map(|m| Token {
            kind: if m.as_str().starts_with('#') {
                TokenKind::Comment
            } else {
                TokenKind::String
            },
            range: m.range(),
        })
        .collect();

    let keywords: Vec<Token> = KEYWORD_RE
        .find_iter(text)
        .filter(|m| {
            !tokens
                .iter()
                .any(|t| t.range.start <= m.start() && m.end() <= t.range.end)
        })
        .map(|m| Token {
            kind: TokenKind::Keyword,
            range: m.range(),
        })
        .collect();

    tokens.extend(keywords);
    tokens.sort_by_key(|t| t.range.start);
    tokens
}

/// Highlight `text` only if `path` names a Python file.
pub fn highlight_for(path: Option<&Path>, text: &str) -> Vec<Token> {
    if is_highlightable(path) {
        highlight(text)
    } else {
        Vec::new()
    }
}
