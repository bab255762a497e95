//! `fenced-code-closing`: a fence left open at the end of the document.

use super::RuleId;
use crate::diagnostic::{Diagnostic, FixKind, QuickFix};
use crate::span::Span;

pub(super) fn check(open_fence: Option<&str>, doc_len: u32, out: &mut Vec<Diagnostic>) {
    let Some(token) = open_fence else {
        return;
    };

    out.push(
        RuleId::FencedCodeClosing
            .diagnostic(
                "Unclosed fenced code block",
                Span::new(doc_len.saturating_sub(1), doc_len),
            )
            .with_fix(QuickFix::new(
                "Close code block",
                FixKind::AppendClosingFence {
                    token: token.to_string(),
                },
            )),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_utils::lint_rule;
    use crate::{Severity, TextEdit};

    #[test]
    fn test_unclosed_fence() {
        let found = lint_rule("```js\ncode", RuleId::FencedCodeClosing);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span, Span::new(9, 10));
        assert_eq!(found[0].severity, Severity::Error);
        assert_eq!(found[0].edit(), Some(TextEdit::insert(10, "\n```")));
    }

    #[test]
    fn test_closed_fence() {
        assert!(lint_rule("~~~\ncode\n~~~", RuleId::FencedCodeClosing).is_empty());
    }

    #[test]
    fn test_mismatched_close_leaves_fence_open() {
        let found = lint_rule("````\ncode\n```", RuleId::FencedCodeClosing);
        assert_eq!(found[0].edit(), Some(TextEdit::insert(13, "\n````")));
    }
}
