//! `no-multiple-blanks`: at most one blank line in a row.

use super::{LineContext, RuleId};
use crate::diagnostic::{Diagnostic, FixKind, QuickFix};
use crate::span::Span;
use crate::state::RollingState;
use crate::syntax;

pub(super) fn check(
    ctx: &LineContext<'_, '_>,
    state: &mut RollingState,
    out: &mut Vec<Diagnostic>,
) {
    let run = state.observe_line(syntax::is_blank(ctx.line.text));
    if run <= 1 {
        return;
    }

    let start = ctx.start();
    let end = ctx.end().max((start + 1).min(ctx.doc_len));
    out.push(
        RuleId::NoMultipleBlanks
            .diagnostic("Multiple consecutive blank lines", Span::new(start, end))
            .with_fix(QuickFix::new(
                "Remove extra blank line",
                FixKind::CollapseBlankLine {
                    line_len: ctx.end() - start,
                },
            )),
    );
}
