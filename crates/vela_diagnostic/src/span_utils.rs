//! Line/column lookup from byte offsets.

use vela_ir::Span;

/// Pre-computed line-start offsets for O(log L) byte-offset → (line, col)
/// lookups, instead of rescanning the source for every label in a
/// diagnostic.
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                offsets.push((i + 1) as u32);
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line number containing `offset`.
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        (line_idx as u32) + 1
    }

    /// 1-based `(line, column)` for a byte offset; column counts chars,
    /// not bytes, from the start of the line.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.offsets[(line - 1) as usize] as usize;
        let offset = (offset as usize).min(source.len());
        let col = source[line_start..offset].chars().count() as u32 + 1;
        (line, col)
    }

    /// Convenience: resolve both endpoints of a span.
    pub fn span_to_line_col(&self, source: &str, span: Span) -> ((u32, u32), (u32, u32)) {
        (
            self.offset_to_line_col(source, span.start),
            self.offset_to_line_col(source, span.end),
        )
    }

    /// Byte offset of the start of line `n` (1-based), or `None` if `n`
    /// is out of range.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// The full text of line `n` (1-based), without its trailing newline.
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let start = self.line_start_offset(line)? as usize;
        let end = self
            .line_start_offset(line + 1)
            .map(|o| o as usize - 1)
            .unwrap_or(source.len());
        source.get(start..end.max(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_to_line_col_basic() {
        let source = "line1\nline2\nline3";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
        assert_eq!(table.offset_to_line_col(source, 6), (2, 1));
        assert_eq!(table.offset_to_line_col(source, 12), (3, 1));
    }

    #[test]
    fn line_text_strips_newline() {
        let source = "abc\ndef\nghi";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.line_text(source, 2), Some("def"));
        assert_eq!(table.line_text(source, 3), Some("ghi"));
    }

    #[test]
    fn column_counts_chars_not_bytes() {
        let source = "café\nx";
        let table = LineOffsetTable::build(source);
        // 'é' is 2 bytes but 1 char; offset 5 is right after it (byte index).
        assert_eq!(table.offset_to_line_col(source, 5), (1, 5));
    }
}
