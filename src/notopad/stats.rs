//! Buffer statistics shown in the status bar and the word-count dialog.

/// Counts derived from a text buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Editor lines: one more than the number of newlines.
    pub lines: usize,
    pub words: usize,
    /// Unicode scalar values, not bytes.
    pub chars: usize,
    pub chars_no_spaces: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        let mut lines = 1;
        let mut chars = 0;
        let mut chars_no_spaces = 0;

        for c in text.chars() {
            chars += 1;
            match c {
                '\n' => lines += 1,
                ' ' => {}
                _ => chars_no_spaces += 1,
            }
        }

        Self {
            lines,
            words: text.split_whitespace().count(),
            chars,
            chars_no_spaces,
        }
    }

    /// Compact status-bar rendering, e.g. `Lines: 3  Words: 12  Chars: 80`.
    pub fn status_line(&self) -> String {
        format!(
            "Lines: {}  Words: {}  Chars: {}",
            self.lines, self.words, self.chars
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_has_one_line() {
        let stats = TextStats::of("");
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.words, 0);
        assert_eq!(stats.chars, 0);
    }

    #[test]
    fn counts_lines_words_and_chars() {
        let stats = TextStats::of("hello world\nsecond line here\n");
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.words, 5);
        assert_eq!(stats.chars, 29);
        assert_eq!(stats.chars_no_spaces, 24);
    }

    #[test]
    fn counts_unicode_scalars_not_bytes() {
        let stats = TextStats::of("café ñ");
        assert_eq!(stats.chars, 6);
        assert_eq!(stats.chars_no_spaces, 5);
    }

    #[test]
    fn status_line_format() {
        let stats = TextStats::of("a b\nc");
        assert_eq!(stats.status_line(), "Lines: 2  Words: 3  Chars: 5");
    }
}
