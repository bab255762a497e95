//! Structural classifier.
//!
//! Walks a [`Document`] top to bottom and tags every line with its structural
//! context: fence delimiter, fenced content, inside an inline code span, or
//! plain text. Both the diagnostic pass and the fixer consume this stream, so
//! what gets reported and what gets rewritten cannot drift apart.
//!
//! Inline code is tracked as the parity of unescaped backticks over the whole
//! document prefix before a line. The count is carried forward line by line,
//! which yields the same answer as rescanning the prefix for every line.

use crate::document::{Document, LineInfo};

/// Structural context of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Ordinary text outside any code region.
    Text,
    /// The line starts inside an unterminated inline code span.
    InlineCode,
    /// A fence delimiter that opens a fenced block.
    FenceOpen,
    /// The fence delimiter that closes the open block.
    FenceClose,
    /// Content inside a fenced block.
    FencedContent,
}

impl LineKind {
    /// Returns true if line rules must leave this line alone.
    pub fn is_opaque(self) -> bool {
        !matches!(self, LineKind::Text)
    }
}

/// A line with its structural classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    /// 0-based line index.
    pub index: usize,
    /// Absolute byte range of the line content.
    pub info: LineInfo,
    /// Line text without the newline.
    pub text: &'a str,
    /// Structural context.
    pub kind: LineKind,
}

impl ClassifiedLine<'_> {
    /// Returns true if line rules must leave this line alone.
    pub fn is_opaque(&self) -> bool {
        self.kind.is_opaque()
    }
}

/// Iterator classifying the lines of a document.
///
/// State is owned by the iterator, so every pass starts from scratch.
#[derive(Debug)]
pub struct Classifier<'d, 'a> {
    doc: &'d Document<'a>,
    next_line: usize,
    /// Opening delimiter run of the current fenced block.
    fence: Option<&'a str>,
    /// Parity of unescaped backticks seen so far.
    in_inline_code: bool,
}

impl<'d, 'a> Classifier<'d, 'a> {
    /// Creates a classifier positioned at the first line.
    pub fn new(doc: &'d Document<'a>) -> Self {
        Self {
            doc,
            next_line: 0,
            fence: None,
            in_inline_code: false,
        }
    }

    /// Returns the opening token of a fenced block that is still open.
    ///
    /// After the iterator is exhausted this is the unclosed fence, if any.
    pub fn open_fence(&self) -> Option<&'a str> {
        self.fence
    }

    fn classify(&mut self, text: &'a str) -> LineKind {
        match (self.fence, fence_run(text)) {
            (None, Some(run)) => {
                self.fence = Some(run);
                LineKind::FenceOpen
            }
            (Some(token), Some(_)) if text.trim() == token => {
                self.fence = None;
                LineKind::FenceClose
            }
            (Some(_), _) => LineKind::FencedContent,
            (None, None) if self.in_inline_code => LineKind::InlineCode,
            (None, None) => LineKind::Text,
        }
    }
}

impl<'a> Iterator for Classifier<'_, 'a> {
    type Item = ClassifiedLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next_line;
        let info = *self.doc.lines().get(index)?;
        let text = self.doc.line_text(index)?;
        self.next_line += 1;

        let kind = self.classify(text);
        if unescaped_backticks(text) % 2 == 1 {
            self.in_inline_code = !self.in_inline_code;
        }

        Some(ClassifiedLine {
            index,
            info,
            text,
            kind,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.doc.lines().len().saturating_sub(self.next_line);
        (remaining, Some(remaining))
    }
}

/// Returns the delimiter run if `line` starts with 3+ backticks or tildes.
///
/// Anything may follow the run (typically a language tag).
pub fn fence_run(line: &str) -> Option<&str> {
    let first = *line.as_bytes().first()?;
    if first != b'`' && first != b'~' {
        return None;
    }
    let run = line.bytes().take_while(|&b| b == first).count();
    (run >= 3).then(|| &line[..run])
}

/// Counts backticks not escaped by an odd run of backslashes.
pub fn unescaped_backticks(text: &str) -> usize {
    let mut count = 0;
    let mut backslashes = 0usize;
    for b in text.bytes() {
        match b {
            b'\\' => backslashes += 1,
            b'`' => {
                if backslashes % 2 == 0 {
                    count += 1;
                }
                backslashes = 0;
            }
            _ => backslashes = 0,
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Returns true if `offset` lies inside an open inline code span, judged by
    /// the parity of unescaped backticks in `source[..offset]`.
    ///
    /// Offsets past the end, or inside a multi-byte character, are clamped down
    /// to the nearest character boundary.
    fn in_inline_code(source: &str, offset: usize) -> bool {
        let mut end = offset.min(source.len());
        while !source.is_char_boundary(end) {
            end -= 1;
        }
        unescaped_backticks(&source[..end]) % 2 == 1
    }

    fn kinds(source: &str) -> Vec<LineKind> {
        let doc = Document::new(source).unwrap();
        Classifier::new(&doc).map(|line| line.kind).collect()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(kinds("a\nb"), vec![LineKind::Text, LineKind::Text]);
    }

    #[test]
    fn test_fenced_block() {
        assert_eq!(
            kinds("```rust\nlet x = 1;\n```\nafter"),
            vec![
                LineKind::FenceOpen,
                LineKind::FencedContent,
                LineKind::FenceClose,
                LineKind::Text,
            ]
        );
    }

    #[test]
    fn test_tilde_fence_ignores_backtick_lines() {
        assert_eq!(
            kinds("~~~\n```\n~~~"),
            vec![
                LineKind::FenceOpen,
                LineKind::FencedContent,
                LineKind::FenceClose,
            ]
        );
    }

    #[test]
    fn test_close_requires_exact_token() {
        let doc = Document::new("````\n```\n`````\n````").unwrap();
        let mut classifier = Classifier::new(&doc);
        let found: Vec<_> = classifier.by_ref().map(|l| l.kind).collect();
        assert_eq!(
            found,
            vec![
                LineKind::FenceOpen,
                LineKind::FencedContent,
                LineKind::FencedContent,
                LineKind::FenceClose,
            ]
        );
        assert_eq!(classifier.open_fence(), None);
    }

    #[test]
    fn test_close_with_trailing_whitespace() {
        assert_eq!(
            kinds("```\nx\n```  "),
            vec![
                LineKind::FenceOpen,
                LineKind::FencedContent,
                LineKind::FenceClose,
            ]
        );
    }

    #[test]
    fn test_indented_delimiter_does_not_close() {
        assert_eq!(
            kinds("```\n  ```\n```"),
            vec![
                LineKind::FenceOpen,
                LineKind::FencedContent,
                LineKind::FenceClose,
            ]
        );
    }

    #[test]
    fn test_unclosed_fence_reports_token_only() {
        let doc = Document::new("```js\ncode").unwrap();
        let mut classifier = Classifier::new(&doc);
        classifier.by_ref().for_each(drop);
        assert_eq!(classifier.open_fence(), Some("```"));
    }

    #[test]
    fn test_inline_span_across_lines() {
        assert_eq!(
            kinds("start `code\nstill code\nend` done\nafter"),
            vec![
                LineKind::Text,
                LineKind::InlineCode,
                LineKind::InlineCode,
                LineKind::Text,
            ]
        );
    }

    #[test]
    fn test_escaped_backtick_is_not_counted() {
        assert_eq!(
            kinds("a \\` b\nnext"),
            vec![LineKind::Text, LineKind::Text]
        );
        assert_eq!(
            kinds("a \\\\` b\nnext"),
            vec![LineKind::Text, LineKind::InlineCode]
        );
    }

    #[test]
    fn test_fence_backticks_count_towards_parity() {
        // 3 + 1 + 3 backticks before the last line.
        assert_eq!(unescaped_backticks("```"), 3);
        assert_eq!(
            kinds("```\n`\n```\nx"),
            vec![
                LineKind::FenceOpen,
                LineKind::FencedContent,
                LineKind::FenceClose,
                LineKind::InlineCode,
            ]
        );
    }

    #[test]
    fn test_forward_scan_matches_prefix_scan() {
        let source = "one `two\nthree` four\n```\n` inside\n```\nfive \\` six\n`seven\neight";
        let doc = Document::new(source).unwrap();
        for line in Classifier::new(&doc) {
            if matches!(line.kind, LineKind::Text | LineKind::InlineCode) {
                assert_eq!(
                    line.kind == LineKind::InlineCode,
                    in_inline_code(source, line.info.start as usize),
                    "line {}",
                    line.index
                );
            }
        }
    }

    #[test]
    fn test_in_inline_code_clamps_offsets() {
        assert!(in_inline_code("`é", 2));
        assert!(!in_inline_code("``", 100));
    }

    #[test]
    fn test_fence_run() {
        assert_eq!(fence_run("```rust"), Some("```"));
        assert_eq!(fence_run("~~~~"), Some("~~~~"));
        assert_eq!(fence_run("``"), None);
        assert_eq!(fence_run("~`~"), None);
        assert_eq!(fence_run(""), None);
    }
}
