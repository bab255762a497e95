//! Diagnostic producer.

use std::panic::{self, UnwindSafe};

use tracing::{debug, warn};

use crate::LinterError;
use crate::classifier::Classifier;
use crate::diagnostic::Diagnostic;
use crate::document::Document;
use crate::rules;
use crate::state::RollingState;

/// Lints `source` and returns its diagnostics ordered by start offset.
///
/// Never fails: on an internal error or panic an empty list is returned.
pub fn lint(source: &str) -> Vec<Diagnostic> {
    guarded("Lint", || try_lint(source), Vec::new)
}

/// Runs `f`, turning an error or a panic into `fallback()` with a warning.
pub(crate) fn guarded<T>(
    pass: &str,
    f: impl FnOnce() -> Result<T, LinterError> + UnwindSafe,
    fallback: impl FnOnce() -> T,
) -> T {
    match panic::catch_unwind(f) {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            warn!("{} failed, using fallback: {}", pass, e);
            fallback()
        }
        Err(_) => {
            warn!("{} panicked, using fallback", pass);
            fallback()
        }
    }
}

/// Fallible form of [`lint`].
pub fn try_lint(source: &str) -> Result<Vec<Diagnostic>, LinterError> {
    let doc = Document::new(source)?;
    let mut classifier = Classifier::new(&doc);
    let mut state = RollingState::new();
    let mut diagnostics = Vec::new();

    for line in classifier.by_ref() {
        if line.is_opaque() {
            state.reset_blanks();
            continue;
        }
        rules::check_line(&line, doc.len(), &mut state, &mut diagnostics);
    }
    rules::check_end(classifier.open_fence(), doc.len(), &mut diagnostics);

    // Stable: rule order breaks ties.
    diagnostics.sort_by_key(|d| d.span.start);

    debug!("Lint produced {} diagnostics", diagnostics.len());
    Ok(diagnostics)
}

/// Lints `content` and resolves each diagnostic's line/column location.
pub fn lint_with_locations(content: &str) -> Result<Vec<Diagnostic>, LinterError> {
    let doc = Document::new(content)?;
    let diagnostics = try_lint(content)?
        .into_iter()
        .map(|d| {
            let loc = doc.location(d.span);
            d.with_location(loc)
        })
        .collect();
    Ok(diagnostics)
}
