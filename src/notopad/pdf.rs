//! PDF export.
//!
//! The coordinator only hands over raw text and a target path; everything about
//! page layout lives behind [`PdfRenderer`]. [`SimplePdfRenderer`] writes a plain
//! PDF 1.4 file: US Letter pages, Helvetica 12pt, word-wrapped at 80 columns and
//! paginated.

use crate::error::{NotopadError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

pub const PAGE_WIDTH: u32 = 612;
pub const PAGE_HEIGHT: u32 = 792;
pub const MARGIN: u32 = 50;
pub const FONT_SIZE: u32 = 12;
pub const LEADING: u32 = 14;
pub const WRAP_COLUMNS: usize = 80;

pub trait PdfRenderer: Send + Sync {
    /// Render `text` into a PDF at `path`. Failures are reported as
    /// [`NotopadError::Export`].
    fn render(&self, text: &str, path: &Path) -> Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SimplePdfRenderer;

impl SimplePdfRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn lines_per_page() -> usize {
        ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize
    }

    /// Split text into pages of wrapped lines. Always yields at least one page.
    pub fn layout(text: &str) -> Vec<Vec<String>> {
        let lines: Vec<String> = text.split('\n').flat_map(wrap_line).collect();
        let per_page = Self::lines_per_page();
        let mut pages: Vec<Vec<String>> =
            lines.chunks(per_page).map(|chunk| chunk.to_vec()).collect();
        if pages.is_empty() {
            pages.push(Vec::new());
        }
        pages
    }

    pub fn render_to_bytes(&self, text: &str) -> Result<Vec<u8>> {
        let pages = Self::layout(text);
        let mut writer = PdfWriter::default();

        // Object ids: 1 catalog, 2 page tree, 3 font, then (page, content) pairs.
        let page_ids: Vec<usize> = (0..pages.len()).map(|i| 4 + 2 * i).collect();
        let kids = page_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");

        writer.object(1, b"<< /Type /Catalog /Pages 2 0 R >>")?;
        writer.object(
            2,
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids,
                pages.len()
            )
            .as_bytes(),
        )?;
        writer.object(
            3,
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
        )?;

        for (page, page_id) in pages.iter().zip(&page_ids) {
            let content_id = page_id + 1;
            writer.object(
                *page_id,
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                     /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                    PAGE_WIDTH, PAGE_HEIGHT, content_id
                )
                .as_bytes(),
            )?;

            let stream = page_stream(page);
            let mut body = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
            body.extend_from_slice(&stream);
            body.extend_from_slice(b"\nendstream");
            writer.object(content_id, &body)?;
        }

        writer.finish(1)
    }
}

impl PdfRenderer for SimplePdfRenderer {
    fn render(&self, text: &str, path: &Path) -> Result<()> {
        let bytes = self.render_to_bytes(text)?;
        fs::write(path, bytes)
            .map_err(|e| NotopadError::Export(format!("{}: {}", path.display(), e)))
    }
}

/// Greedy word wrap for lines longer than [`WRAP_COLUMNS`]. Words that alone
/// exceed the width are hard-split.
fn wrap_line(line: &str) -> Vec<String> {
    if line.chars().count() <= WRAP_COLUMNS {
        return vec![line.to_string()];
    }

    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > WRAP_COLUMNS {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            out.push(word.drain(..WRAP_COLUMNS).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > WRAP_COLUMNS {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn page_stream(lines: &[String]) -> Vec<u8> {
    let mut stream = format!(
        "BT\n/F1 {} Tf\n{} TL\n{} {} Td\n",
        FONT_SIZE,
        LEADING,
        MARGIN,
        PAGE_HEIGHT - MARGIN - FONT_SIZE
    )
    .into_bytes();

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            stream.extend_from_slice(b"T*\n");
        }
        stream.push(b'(');
        stream.extend(encode_pdf_string(line));
        stream.extend_from_slice(b") Tj\n");
    }
    stream.extend_from_slice(b"ET");
    stream
}

/// Latin-1 bytes with PDF string escapes; anything else becomes `?`.
fn encode_pdf_string(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            '\t' => out.extend_from_slice(b"    "),
            c if (c as u32) < 0x20 => out.push(b'?'),
            c if (c as u32) <= 0xFF => out.push(c as u32 as u8),
            _ => out.push(b'?'),
        }
    }
    out
}

#[derive(Default)]
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl PdfWriter {
    fn header(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            self.buf
                .write_all(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n")
                .map_err(export_error)?;
        }
        Ok(())
    }

    fn object(&mut self, id: usize, body: &[u8]) -> Result<()> {
        self.header()?;
        self.offsets.push((id, self.buf.len()));
        write!(self.buf, "{} 0 obj\n", id).map_err(export_error)?;
        self.buf.write_all(body).map_err(export_error)?;
        self.buf.write_all(b"\nendobj\n").map_err(export_error)?;
        Ok(())
    }

    fn finish(mut self, root: usize) -> Result<Vec<u8>> {
        self.offsets.sort_by_key(|(id, _)| *id);
        let count = self.offsets.len() + 1;
        let xref_at = self.buf.len();

        write!(self.buf, "xref\n0 {}\n0000000000 65535 f \n", count).map_err(export_error)?;
        for (_, offset) in &self.offsets {
            write!(self.buf, "{:010} 00000 n \n", offset).map_err(export_error)?;
        }
        write!(
            self.buf,
            "trailer\n<< /Size {} /Root {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            count, root, xref_at
        )
        .map_err(export_error)?;
        Ok(self.buf)
    }
}

fn export_error(e: std::io::Error) -> NotopadError {
    NotopadError::Export(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn short_lines_are_untouched() {
        assert_eq!(wrap_line("hello world"), vec!["hello world".to_string()]);
        assert_eq!(wrap_line(""), vec![String::new()]);
    }

    #[test]
    fn long_lines_wrap_at_word_boundaries() {
        let line = "word ".repeat(40);
        let wrapped = wrap_line(line.trim_end());
        assert!(wrapped.len() > 1);
        for l in &wrapped {
            assert!(l.chars().count() <= WRAP_COLUMNS);
            assert!(!l.starts_with(' '));
        }
        assert_eq!(wrapped.join(" "), line.trim_end());
    }

    #[test]
    fn overlong_words_are_hard_split() {
        let line = "x".repeat(200);
        let wrapped = wrap_line(&line);
        assert_eq!(wrapped.len(), 3);
        assert_eq!(wrapped[0].len(), 80);
        assert_eq!(wrapped[2].len(), 40);
    }

    #[test]
    fn layout_paginates() {
        let per_page = SimplePdfRenderer::lines_per_page();
        let text = (0..per_page + 5)
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let pages = SimplePdfRenderer::layout(&text);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), per_page);
        assert_eq!(pages[1].len(), 5);
    }

    #[test]
    fn empty_text_is_one_page() {
        assert_eq!(SimplePdfRenderer::layout("").len(), 1);
    }

    #[test]
    fn renders_valid_looking_pdf() {
        let bytes = SimplePdfRenderer::new()
            .render_to_bytes("Hello (world)\nback\\slash")
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(contains(&bytes, b"(Hello \\(world\\)) Tj"));
        assert!(contains(&bytes, b"(back\\\\slash) Tj"));
        assert!(contains(&bytes, b"/Count 1"));
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn non_latin1_text_is_replaced() {
        assert_eq!(encode_pdf_string("café ✓"), b"caf\xe9 ?".to_vec());
    }

    #[test]
    fn render_reports_export_error_for_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.pdf");
        let err = SimplePdfRenderer::new().render("x", &path).unwrap_err();
        assert!(matches!(err, NotopadError::Export(_)));
    }

    #[test]
    fn render_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        SimplePdfRenderer::new().render("hi", &path).unwrap();
        assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));
    }
}
