//! `consistent-list-marker`: top-level list items share the first marker.

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
    let Some(found) = syntax::list_marker(ctx.line.text) else {
        return;
    };
    let Some(expected) = state.check_list_marker(found) else {
        return;
    };

    let start = ctx.start();
    out.push(
        RuleId::ConsistentListMarker
            .diagnostic(
                format!("Inconsistent list marker: expected '{expected}', found '{found}'"),
                Span::new(start, start + 1),
            )
            .with_fix(QuickFix::new(
                format!("Use '{expected}' marker"),
                FixKind::ReplaceListMarker { expected },
            )),
    );
}
