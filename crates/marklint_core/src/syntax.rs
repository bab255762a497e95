//! Line-level Markdown predicates shared by the rule set and the fixer.
//!
//! Keeping one definition of "heading", "blank" and "list marker" means the
//! diagnostics always describe exactly what the fixer rewrites.

/// Maximum heading level recognised by an ATX `#` run.
pub const MAX_HEADING_LEVEL: usize = 6;

/// Unordered list marker characters.
pub const LIST_MARKERS: [char; 3] = ['-', '*', '+'];

/// Shape of a line that starts with a `#` run of length 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingShape {
    /// `#` run followed by whitespace and content, e.g. `## Title`.
    Valid { level: u8 },
    /// `#` run followed directly by content, e.g. `##Title`.
    /// `next_len` is the UTF-8 length of the first content character.
    MissingSpace { level: u8, next_len: u8 },
    /// `#` run followed only by whitespace, e.g. `###` or `#  `.
    Empty { level: u8 },
}

impl HeadingShape {
    /// Returns the heading level.
    pub fn level(&self) -> u8 {
        match *self {
            HeadingShape::Valid { level }
            | HeadingShape::MissingSpace { level, .. }
            | HeadingShape::Empty { level } => level,
        }
    }
}

/// Classifies the heading shape of a line, if it starts with 1-6 `#`.
///
/// The `#` run is maximal: a run of seven or more is not a heading at all.
pub fn heading_shape(line: &str) -> Option<HeadingShape> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > MAX_HEADING_LEVEL {
        return None;
    }

    let level = hashes as u8;
    let rest = &line[hashes..];
    let first = match rest.chars().next() {
        Some(c) => c,
        None => return Some(HeadingShape::Empty { level }),
    };

    if rest.trim().is_empty() {
        Some(HeadingShape::Empty { level })
    } else if first.is_whitespace() {
        Some(HeadingShape::Valid { level })
    } else {
        Some(HeadingShape::MissingSpace {
            level,
            next_len: first.len_utf8() as u8,
        })
    }
}

/// Returns the byte length of the trailing run of spaces and tabs.
pub fn trailing_whitespace_len(line: &str) -> usize {
    line.len() - line.trim_end_matches([' ', '\t']).len()
}

/// Returns the line with its trailing spaces and tabs removed.
pub fn trim_trailing_whitespace(line: &str) -> &str {
    line.trim_end_matches([' ', '\t'])
}

/// Returns true if the line is empty or whitespace only.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Returns the unordered list marker of a zero-indent list item.
///
/// The marker must be followed by a whitespace character once trailing
/// spaces and tabs are dropped, so a lone `- ` is not a list item.
/// This deliberately differs from a raw `^[-*+]\s` match: the fixer strips
/// trailing whitespace before rewriting markers, and both passes must agree
/// on what a list item is.
pub fn list_marker(line: &str) -> Option<char> {
    let mut chars = trim_trailing_whitespace(line).chars();
    let marker = chars.next().filter(|c| LIST_MARKERS.contains(c))?;
    chars.next().filter(|c| c.is_whitespace()).map(|_| marker)
}
