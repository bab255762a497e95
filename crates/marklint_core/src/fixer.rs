//! Whole-document auto-fix and edit application.
//!
//! [`fix`] replays the classifier and rewrites every non-opaque line in one
//! pass. [`apply_edits`] and [`apply_fixes_to_content`] apply individual
//! quick-fix edits instead, from the end of the text backwards.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::LinterError;
use crate::classifier::Classifier;
use crate::diagnostic::{Diagnostic, TextEdit};
use crate::document::Document;
use crate::linter::guarded;
use crate::state::RollingState;
use crate::syntax::{self, HeadingShape};

/// Rewrites `source` so that every fixable issue is resolved.
///
/// Never fails: on an internal error or panic the input is returned
/// unchanged.
pub fn fix(source: &str) -> String {
    guarded("Fix", || try_fix(source), || source.to_string())
}

/// Fallible form of [`fix`].
pub fn try_fix(source: &str) -> Result<String, LinterError> {
    let doc = Document::new(source)?;
    let mut classifier = Classifier::new(&doc);
    let mut state = RollingState::new();
    let mut lines: Vec<Cow<'_, str>> = Vec::with_capacity(doc.lines().len() + 1);

    for line in classifier.by_ref() {
        if line.is_opaque() {
            state.reset_blanks();
            lines.push(Cow::Borrowed(line.text));
        } else if let Some(fixed) = fix_line(line.text, &mut state) {
            lines.push(fixed);
        }
    }

    // Close with the bare delimiter run, never the info string.
    if let Some(token) = classifier.open_fence() {
        lines.push(Cow::Borrowed(token));
    }

    let fixed = lines.join("\n");
    debug!(
        "Fixed document: {} -> {} bytes",
        source.len(),
        fixed.len()
    );
    Ok(fixed)
}

/// Rewrites one text line, or returns `None` to drop it.
fn fix_line<'a>(text: &'a str, state: &mut RollingState) -> Option<Cow<'a, str>> {
    let mut line = Cow::Borrowed(syntax::trim_trailing_whitespace(text));

    match syntax::heading_shape(&line) {
        Some(HeadingShape::MissingSpace { level, .. }) => {
            let (hashes, rest) = line.split_at(level as usize);
            line = Cow::Owned(format!("{hashes} {rest}"));
        }
        // Dropped lines leave the blank run untouched, so blanks on either
        // side collapse as if they were adjacent.
        Some(HeadingShape::Empty { .. }) => return None,
        _ => {}
    }

    if state.observe_line(syntax::is_blank(&line)) > 1 {
        return None;
    }

    if let Some(found) = syntax::list_marker(&line)
        && let Some(expected) = state.check_list_marker(found)
    {
        let mut owned = line.into_owned();
        owned.replace_range(..found.len_utf8(), expected.encode_utf8(&mut [0; 4]));
        line = Cow::Owned(owned);
    }

    Some(line)
}

/// Result of applying fixes to a file.
#[derive(Debug)]
pub struct FixerResult {
    /// Number of fixes applied.
    pub fixes_applied: usize,
    /// The fixed content.
    pub fixed_content: String,
    /// Whether the content was modified.
    pub modified: bool,
}

impl FixerResult {
    /// Creates a new fixer result.
    pub fn new(fixes_applied: usize, fixed_content: String, modified: bool) -> Self {
        Self {
            fixes_applied,
            fixed_content,
            modified,
        }
    }

    /// Creates a result indicating no changes were made.
    pub fn unchanged(content: String) -> Self {
        Self {
            fixes_applied: 0,
            fixed_content: content,
            modified: false,
        }
    }
}

/// Applies edits to `content` and returns the new text.
///
/// Overlapping edits keep the one that starts later. Edits outside the
/// current text are skipped, which covers offsets computed against an older
/// version of the document.
pub fn apply_edits(content: &str, edits: &[TextEdit]) -> String {
    let (text, _) = apply_edit_refs(content, edits.iter().collect());
    text
}

/// Applies the quick fixes attached to `diagnostics`.
pub fn apply_fixes_to_content(content: &str, diagnostics: &[Diagnostic]) -> FixerResult {
    let edits: Vec<TextEdit> = diagnostics.iter().filter_map(Diagnostic::edit).collect();

    if edits.is_empty() {
        return FixerResult::unchanged(content.to_string());
    }

    let (fixed, applied) = apply_edit_refs(content, edits.iter().collect());
    FixerResult::new(applied, fixed, applied > 0)
}

fn apply_edit_refs(content: &str, mut edits: Vec<&TextEdit>) -> (String, usize) {
    // Apply from end to beginning so earlier offsets stay valid.
    edits.sort_by(|a, b| b.span.start.cmp(&a.span.start));
    let edits = filter_overlapping_edits(edits);

    let mut result = content.to_string();
    let mut applied = 0;

    for edit in &edits {
        let start = edit.span.start as usize;
        let end = edit.span.end as usize;

        if start > end
            || end > result.len()
            || !result.is_char_boundary(start)
            || !result.is_char_boundary(end)
        {
            warn!(
                "Invalid edit span: start={}, end={}, content_len={}",
                start,
                end,
                result.len()
            );
            continue;
        }

        debug!("Applying edit: replace [{}..{}] with {:?}", start, end, edit.text);
        result.replace_range(start..end, &edit.text);
        applied += 1;
    }

    (result, applied)
}

/// Filters out overlapping edits, keeping the one that starts later.
///
/// Expects `edits` sorted by start offset in descending order.
pub(crate) fn filter_overlapping_edits(edits: Vec<&TextEdit>) -> Vec<&TextEdit> {
    if edits.len() <= 1 {
        return edits;
    }

    #[cfg(debug_assertions)]
    {
        for window in edits.windows(2) {
            debug_assert!(
                window[0].span.start >= window[1].span.start,
                "Edits must be sorted by start descending for filter_overlapping_edits"
            );
        }
    }

    let mut result: Vec<&TextEdit> = Vec::with_capacity(edits.len());

    for edit in edits {
        // `result.last()` has the smallest start among accepted edits, so it
        // is the only one the candidate can overlap.
        let overlaps = result
            .last()
            .is_some_and(|last| edit.span.overlaps(&last.span));

        if overlaps {
            warn!(
                "Skipping overlapping edit at [{}, {}]",
                edit.span.start, edit.span.end
            );
        } else {
            result.push(edit);
        }
    }

    result
}

/// Applies the quick fixes of `diagnostics` to a file and writes the result.
pub fn apply_fixes_to_file(
    path: &Path,
    diagnostics: &[Diagnostic],
) -> Result<FixerResult, LinterError> {
    let content = fs::read_to_string(path)
        .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))?;

    let result = apply_fixes_to_content(&content, diagnostics);

    if result.modified {
        fs::write(path, &result.fixed_content)
            .map_err(|e| LinterError::file(format!("Failed to write {}: {}", path.display(), e)))?;
    }

    Ok(result)
}
