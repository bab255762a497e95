//! Heading outline and document title.

use serde::Serialize;

use crate::classifier::Classifier;
use crate::document::Document;
use crate::span::Span;
use crate::syntax::{self, HeadingShape};

/// Title used when a document has no level-1 heading.
pub const UNTITLED: &str = "Untitled";

/// A well-formed heading outside code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text without the `#` run, trimmed.
    pub text: String,
    /// Span of the whole heading line.
    pub span: Span,
}

/// Lists the well-formed headings of `source` in document order.
///
/// Lines inside fenced blocks or inline code spans are skipped.
pub fn outline(source: &str) -> Vec<Heading> {
    let Ok(doc) = Document::new(source) else {
        return Vec::new();
    };

    Classifier::new(&doc)
        .filter(|line| !line.is_opaque())
        .filter_map(|line| match syntax::heading_shape(line.text) {
            Some(HeadingShape::Valid { level }) => Some(Heading {
                level,
                text: line.text[level as usize..].trim().to_string(),
                span: line.info.span(),
            }),
            _ => None,
        })
        .collect()
}

/// Returns the text of the first level-1 heading, or [`UNTITLED`].
pub fn title(source: &str) -> String {
    outline(source)
        .into_iter()
        .find(|heading| heading.level == 1)
        .map(|heading| heading.text)
        .unwrap_or_else(|| UNTITLED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_outline() {
        let headings = outline("# One\ntext\n## Two  \n```\n# code\n```\n##Bad\n###");
        assert_eq!(
            headings,
            vec![
                Heading {
                    level: 1,
                    text: "One".to_string(),
                    span: Span::new(0, 5),
                },
                Heading {
                    level: 2,
                    text: "Two".to_string(),
                    span: Span::new(11, 19),
                },
            ]
        );
    }

    #[test]
    fn test_title() {
        assert_eq!(title("Intro\n## Sub\n#  My Doc \n# Second"), "My Doc");
    }

    #[test]
    fn test_title_defaults() {
        assert_eq!(title(""), "Untitled");
        assert_eq!(title("## Only h2"), "Untitled");
        assert_eq!(title("```\n# Not a title\n```"), "Untitled");
    }
}
