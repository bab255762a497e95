//! `no-trailing-spaces`

use super::{LineContext, RuleId};
use crate::diagnostic::{Diagnostic, FixKind, QuickFix};
use crate::span::Span;
use crate::syntax;

pub(super) fn check(ctx: &LineContext<'_, '_>, out: &mut Vec<Diagnostic>) {
    let trailing = syntax::trailing_whitespace_len(ctx.line.text) as u32;
    if trailing == 0 {
        return;
    }

    let end = ctx.end();
    out.push(
        RuleId::NoTrailingSpaces
            .diagnostic("Trailing whitespace", Span::new(end - trailing, end))
            .with_fix(QuickFix::new(
                "Remove trailing spaces",
                FixKind::RemoveRange,
            )),
    );
}
