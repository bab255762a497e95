//! Code action handler.

use std::collections::HashMap;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::debug;

use marklint_core::Diagnostic as MarklintDiagnostic;

use crate::Backend;
use crate::conversion::{full_range, offset_to_range, positions_le, to_lsp_diagnostic};

/// Title of the whole-document fix action.
pub const FIX_ALL_TITLE: &str = "Fix all marklint issues";

/// Handles `textDocument/codeAction`.
///
/// Offers a `quickfix` for each fixable diagnostic touching the requested
/// range and a `source.fixAll` that replaces the document with the fixer's
/// output.
pub async fn handle_code_action(
    backend: &Backend,
    params: CodeActionParams,
) -> Result<Option<CodeActionResponse>> {
    debug!("Code action request: {}", params.text_document.uri);

    let uri = &params.text_document.uri;
    let Some(text) = backend.state.document_text(uri) else {
        return Ok(None);
    };

    // If `only` is None, all action kinds are allowed
    let (wants_fix_all, wants_quickfix) = match &params.context.only {
        Some(only) => (
            only.contains(&CodeActionKind::SOURCE_FIX_ALL)
                || only.contains(&CodeActionKind::SOURCE),
            only.contains(&CodeActionKind::QUICKFIX),
        ),
        None => (true, true),
    };

    let mut actions = Vec::new();

    if wants_quickfix {
        // Re-lint so offsets match the cached text.
        let diagnostics = backend.lint_text(&text).await;
        actions.extend(
            diagnostics
                .iter()
                .filter_map(|diag| quick_fix_action(diag, uri, &text, params.range)),
        );
    }

    if wants_fix_all {
        let fixed = backend.fix_text(&text).await;
        if fixed != text {
            actions.push(CodeActionOrCommand::CodeAction(CodeAction {
                title: FIX_ALL_TITLE.to_string(),
                kind: Some(CodeActionKind::SOURCE_FIX_ALL),
                edit: Some(single_edit(uri, full_range(&text), fixed)),
                ..Default::default()
            }));
        }
    }

    Ok(Some(actions))
}

fn quick_fix_action(
    diag: &MarklintDiagnostic,
    uri: &Url,
    text: &str,
    requested: Range,
) -> Option<CodeActionOrCommand> {
    let fix = diag.fix.as_ref()?;
    let lsp_diagnostic = to_lsp_diagnostic(diag, text)?;
    let range = lsp_diagnostic.range;
    if !(positions_le(range.start, requested.end) && positions_le(requested.start, range.end)) {
        return None;
    }

    let edit = diag.edit()?;
    let edit_range = offset_to_range(edit.span.start as usize, edit.span.end as usize, text)?;

    Some(CodeActionOrCommand::CodeAction(CodeAction {
        title: fix.name.clone(),
        kind: Some(CodeActionKind::QUICKFIX),
        diagnostics: Some(vec![lsp_diagnostic]),
        edit: Some(single_edit(uri, edit_range, edit.text)),
        is_preferred: Some(true),
        ..Default::default()
    }))
}

fn single_edit(uri: &Url, range: Range, new_text: String) -> WorkspaceEdit {
    WorkspaceEdit {
        changes: Some(HashMap::from([(
            uri.clone(),
            vec![TextEdit { range, new_text }],
        )])),
        ..Default::default()
    }
}
