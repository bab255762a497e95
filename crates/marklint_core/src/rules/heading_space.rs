//! `heading-space`: `##Title` should read `## Title`.

use super::{LineContext, RuleId};
use crate::diagnostic::{Diagnostic, FixKind, QuickFix};
use crate::span::Span;
use crate::syntax::HeadingShape;

pub(super) fn check(ctx: &LineContext<'_, '_>, out: &mut Vec<Diagnostic>) {
    let Some(HeadingShape::MissingSpace { level, next_len }) = ctx.heading else {
        return;
    };

    let start = ctx.start();
    let span = Span::new(start, start + level as u32 + next_len as u32);
    out.push(
        RuleId::HeadingSpace
            .diagnostic("Missing space after heading marker", span)
            .with_fix(QuickFix::new(
                "Add space",
                FixKind::InsertHeadingSpace { level },
            )),
    );
}
