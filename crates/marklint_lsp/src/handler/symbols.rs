//! Document symbols handler.

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::debug;

use marklint_core::{Heading, outline};

use crate::conversion::offset_to_range;
use crate::state::BackendState;

/// Handles `textDocument/documentSymbol` with the heading outline, nested
/// by level.
pub fn handle_document_symbol(
    state: &BackendState,
    params: DocumentSymbolParams,
) -> Result<Option<DocumentSymbolResponse>> {
    debug!("Document symbol request: {}", params.text_document.uri);

    let Some(text) = state.document_text(&params.text_document.uri) else {
        return Ok(None);
    };

    let symbols = outline(&text)
        .into_iter()
        .filter_map(|heading| to_symbol(heading, &text))
        .collect();

    Ok(Some(DocumentSymbolResponse::Nested(nest(symbols))))
}

fn to_symbol(heading: Heading, text: &str) -> Option<(u8, DocumentSymbol)> {
    let range = offset_to_range(heading.span.start as usize, heading.span.end as usize, text)?;

    #[allow(deprecated)]
    let symbol = DocumentSymbol {
        name: heading.text,
        detail: Some(format!("h{}", heading.level)),
        kind: SymbolKind::STRING,
        tags: None,
        deprecated: None,
        range,
        selection_range: range,
        children: None,
    };

    Some((heading.level, symbol))
}

/// Nests each heading under the closest preceding heading of a lower level.
fn nest(headings: Vec<(u8, DocumentSymbol)>) -> Vec<DocumentSymbol> {
    let mut roots = Vec::new();
    let mut stack: Vec<(u8, DocumentSymbol)> = Vec::new();

    for (level, symbol) in headings {
        while stack.last().is_some_and(|(open, _)| *open >= level) {
            close_innermost(&mut stack, &mut roots);
        }
        stack.push((level, symbol));
    }
    while !stack.is_empty() {
        close_innermost(&mut stack, &mut roots);
    }

    roots
}

fn close_innermost(stack: &mut Vec<(u8, DocumentSymbol)>, roots: &mut Vec<DocumentSymbol>) {
    let Some((_, symbol)) = stack.pop() else {
        return;
    };
    match stack.last_mut() {
        Some((_, parent)) => parent.children.get_or_insert_with(Vec::new).push(symbol),
        None => roots.push(symbol),
    }
}
