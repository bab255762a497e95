//! `no-empty-heading`: a heading marker with nothing after it.
//!
//! No quick fix is offered. The whole-document fixer drops such lines.

use super::{LineContext, RuleId};
use crate::diagnostic::Diagnostic;
use crate::syntax::HeadingShape;

pub(super) fn check(ctx: &LineContext<'_, '_>, out: &mut Vec<Diagnostic>) {
    if let Some(HeadingShape::Empty { .. }) = ctx.heading {
        out.push(
            RuleId::NoEmptyHeading
                .diagnostic("Empty heading has no content", ctx.line.info.span()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;
    use crate::rules::test_utils::lint_rule;
    use crate::span::Span;

    #[test]
    fn test_whole_line_span() {
        let found = lint_rule("Intro\n###  \nBody", RuleId::NoEmptyHeading);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span, Span::new(6, 11));
        assert_eq!(found[0].severity, Severity::Error);
        assert!(found[0].fix.is_none());
    }

    #[test]
    fn test_heading_with_text_is_fine() {
        assert!(lint_rule("# A", RuleId::NoEmptyHeading).is_empty());
    }
}
