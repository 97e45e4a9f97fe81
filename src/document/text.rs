//! Text utilities for position conversion.
//!
//! Provides byte offset <-> LSP position conversion with UTF-16 columns.

use std::ops::Range;

use tower_lsp::lsp_types::Position;

/// Pre-computed line index for efficient position lookups.
///
/// LSP positions use line/column where column is in UTF-16 code units.
/// This struct pre-computes line start offsets for O(log n) lookup.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset where each line starts.
    line_starts: Vec<usize>,
    source: String,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(source: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            line_starts,
            source,
        }
    }

    /// Get the source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line containing the byte `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        }
    }

    /// Byte range of `line`, excluding its terminating newline.
    pub fn line_span(&self, line: usize) -> Option<Range<usize>> {
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map(|&next| next - 1)
            .unwrap_or(self.source.len());
        Some(start..end)
    }

    /// Length of a byte range in UTF-16 code units.
    pub fn utf16_len(&self, span: Range<usize>) -> u32 {
        self.source
            .get(span)
            .map(|s| s.encode_utf16().count() as u32)
            .unwrap_or(0)
    }

    /// Convert a byte offset to an LSP position.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let line = self.line_of(offset);
        let line_start = self.line_starts[line];
        let end = offset.min(self.source.len());

        let col = self.source[line_start..]
            .char_indices()
            .take_while(|(i, _)| line_start + i < end)
            .map(|(_, c)| c.len_utf16() as u32)
            .sum();

        Position::new(line as u32, col)
    }

    /// Convert a byte span to an LSP range.
    pub fn span_to_range(&self, span: &Range<usize>) -> tower_lsp::lsp_types::Range {
        let start = self.offset_to_position(span.start);
        let end = self.offset_to_position(span.end);
        tower_lsp::lsp_types::Range::new(start, end)
    }

    /// LSP range covering the whole document.
    pub fn full_range(&self) -> tower_lsp::lsp_types::Range {
        self.span_to_range(&(0..self.source.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line() {
        let idx = LineIndex::new("hello world".to_string());
        assert_eq!(idx.offset_to_position(0), Position::new(0, 0));
        assert_eq!(idx.offset_to_position(5), Position::new(0, 5));
        assert_eq!(idx.offset_to_position(11), Position::new(0, 11));
    }

    #[test]
    fn multi_line() {
        let idx = LineIndex::new("hello\nworld\ntest".to_string());
        assert_eq!(idx.line_count(), 3);
        assert_eq!(idx.offset_to_position(0), Position::new(0, 0));
        assert_eq!(idx.offset_to_position(5), Position::new(0, 5)); // newline
        assert_eq!(idx.offset_to_position(6), Position::new(1, 0)); // 'w'
        assert_eq!(idx.offset_to_position(11), Position::new(1, 5));
        assert_eq!(idx.offset_to_position(12), Position::new(2, 0)); // 't'
    }

    #[test]
    fn line_spans() {
        let idx = LineIndex::new("ab\n\ncd\n".to_string());
        assert_eq!(idx.line_count(), 4);
        assert_eq!(idx.line_span(0), Some(0..2));
        assert_eq!(idx.line_span(1), Some(3..3));
        assert_eq!(idx.line_span(2), Some(4..6));
        assert_eq!(idx.line_span(3), Some(7..7));
        assert_eq!(idx.line_span(4), None);
        assert_eq!(idx.line_of(3), 1);
        assert_eq!(idx.line_of(5), 2);
    }

    #[test]
    fn utf16_handling() {
        // '😀' is 4 bytes in UTF-8 but 2 code units in UTF-16
        let idx = LineIndex::new("a😀b".to_string());
        assert_eq!(idx.offset_to_position(1), Position::new(0, 1));
        assert_eq!(idx.offset_to_position(5), Position::new(0, 3));
        assert_eq!(idx.utf16_len(0..6), 4);
        assert_eq!(idx.utf16_len(0..99), 0);
    }

    #[test]
    fn ranges() {
        let idx = LineIndex::new("hello\nworld".to_string());
        let range = idx.span_to_range(&(6..11));
        assert_eq!(range.start, Position::new(1, 0));
        assert_eq!(range.end, Position::new(1, 5));

        let full = idx.full_range();
        assert_eq!(full.start, Position::new(0, 0));
        assert_eq!(full.end, Position::new(1, 5));
    }
}
