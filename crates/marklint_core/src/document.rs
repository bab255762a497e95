//! Line table for a document snapshot.
//!
//! Lines are split on `\n` only. A `\r` before the newline stays part of the
//! line text, so CRLF documents keep their carriage returns visible to the
//! rules.

use crate::LinterError;
use crate::span::{Location, Position, Span};

/// Byte range of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    /// Byte offset of line start (inclusive).
    pub start: u32,
    /// Byte offset of end of line content, excluding the newline character.
    pub end: u32,
}

impl LineInfo {
    /// Returns the span of the line content.
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// A document split into lines with absolute offsets.
#[derive(Debug)]
pub struct Document<'a> {
    source: &'a str,
    lines: Vec<LineInfo>,
}

impl<'a> Document<'a> {
    /// Builds the line table for `source`.
    ///
    /// Fails when the source cannot be addressed with 32-bit offsets.
    pub fn new(source: &'a str) -> Result<Self, LinterError> {
        if u32::try_from(source.len()).is_err() {
            return Err(LinterError::DocumentTooLarge { len: source.len() });
        }

        let mut lines = Vec::new();
        let mut offset = 0u32;
        for line in source.split('\n') {
            let end = offset + line.len() as u32;
            lines.push(LineInfo { start: offset, end });
            offset = end.saturating_add(1);
        }

        Ok(Self { source, lines })
    }

    /// Returns the source text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the document length in bytes.
    pub fn len(&self) -> u32 {
        self.source.len() as u32
    }

    /// Returns true if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Returns the line table. There is always at least one line.
    pub fn lines(&self) -> &[LineInfo] {
        &self.lines
    }

    /// Returns the text of a line (0-indexed), without its newline.
    pub fn line_text(&self, index: usize) -> Option<&'a str> {
        let info = self.lines.get(index)?;
        self.source.get(info.start as usize..info.end as usize)
    }

    /// Converts a byte offset to a line/column position.
    ///
    /// Uses binary search over the line table. Offsets past the end clamp to
    /// the end of the document.
    pub fn position(&self, offset: u32) -> Position {
        let offset = offset.min(self.len());
        let idx = self
            .lines
            .partition_point(|info| info.start <= offset)
            .saturating_sub(1);
        let info = &self.lines[idx];
        let column_end = offset.min(info.end) as usize;
        let column = self
            .source
            .get(info.start as usize..column_end)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(0);
        Position::new(idx as u32 + 1, column as u32)
    }

    /// Converts a span to a line/column location.
    pub fn location(&self, span: Span) -> Location {
        Location::new(self.position(span.start), self.position(span.end))
    }
}
