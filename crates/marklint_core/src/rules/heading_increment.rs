//! `heading-increment`: heading levels go up one step at a time.

use super::{LineContext, RuleId};
use crate::diagnostic::Diagnostic;
use crate::span::Span;
use crate::state::RollingState;
use crate::syntax::HeadingShape;

pub(super) fn check(
    ctx: &LineContext<'_, '_>,
    state: &mut RollingState,
    out: &mut Vec<Diagnostic>,
) {
    // Only well-formed headings take part in the level sequence.
    let Some(HeadingShape::Valid { level }) = ctx.heading else {
        return;
    };

    let prev = state.enter_heading(level);
    if prev > 0 && level > prev + 1 {
        let start = ctx.start();
        out.push(RuleId::HeadingIncrement.diagnostic(
            format!(
                "Heading level skipped: expected h{} or lower, found h{}",
                prev + 1,
                level
            ),
            Span::new(start, start + level as u32),
        ));
    }
}
