//! Text document synchronization handlers.

use tower_lsp::lsp_types::*;
use tracing::{debug, error};

use crate::Backend;
use crate::debounce::spawn_debounced_validation;
use crate::state::{BackendState, DocumentData};

/// Stores the latest text of a document.
fn store_document(state: &BackendState, uri: &Url, text: &str, version: i32) -> bool {
    match state.documents.write() {
        Ok(mut docs) => {
            docs.insert(
                uri.clone(),
                DocumentData {
                    text: text.to_string(),
                    version,
                },
            );
            true
        }
        Err(e) => {
            error!("Documents lock poisoned: {}", e);
            false
        }
    }
}

/// Handles `textDocument/didOpen`. Validates immediately.
pub async fn handle_did_open(backend: &Backend, params: DidOpenTextDocumentParams) {
    let doc = params.text_document;
    debug!("Document opened: {}", doc.uri);

    if store_document(&backend.state, &doc.uri, &doc.text, doc.version) {
        backend
            .validate_document(doc.uri, doc.text, Some(doc.version))
            .await;
    }
}

/// Handles `textDocument/didChange`. Validation is debounced.
pub fn handle_did_change(backend: &Backend, params: DidChangeTextDocumentParams) {
    debug!("Document changed: {}", params.text_document.uri);

    // Full sync: the last change carries the whole text.
    let Some(change) = params.content_changes.into_iter().last() else {
        return;
    };

    let uri = params.text_document.uri;
    let version = params.text_document.version;
    if !store_document(&backend.state, &uri, &change.text, version) {
        return;
    }

    let validator = backend.clone();
    spawn_debounced_validation(
        backend.state.clone(),
        uri,
        version,
        move |uri, text, version| async move {
            validator.validate_document(uri, text, Some(version)).await;
        },
    );
}

/// Handles `textDocument/didSave`.
pub async fn handle_did_save(backend: &Backend, params: DidSaveTextDocumentParams) {
    debug!("Document saved: {}", params.text_document.uri);

    if let Some(text) = params.text {
        backend
            .validate_document(params.text_document.uri, text, None)
            .await;
    }
}

/// Handles `textDocument/didClose`. Clears the document's diagnostics.
pub async fn handle_did_close(backend: &Backend, params: DidCloseTextDocumentParams) {
    debug!("Document closed: {}", params.text_document.uri);

    match backend.state.documents.write() {
        Ok(mut docs) => {
            docs.remove(&params.text_document.uri);
        }
        Err(e) => {
            error!("Documents lock poisoned: {}", e);
            return;
        }
    }

    backend
        .client
        .publish_diagnostics(params.text_document.uri, vec![], None)
        .await;
}
