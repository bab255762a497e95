//! LSP type conversion utilities.
//!
//! Engine offsets are UTF-8 bytes; LSP positions count UTF-16 code units.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range};

use marklint_core::{Diagnostic as MarklintDiagnostic, Severity};

/// Value of the `source` field on published diagnostics.
pub const SOURCE: &str = "marklint";

/// Converts a marklint diagnostic to an LSP diagnostic.
pub fn to_lsp_diagnostic(diag: &MarklintDiagnostic, text: &str) -> Option<Diagnostic> {
    let range = offset_to_range(diag.span.start as usize, diag.span.end as usize, text)?;

    let severity = match diag.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Info => DiagnosticSeverity::INFORMATION,
    };

    Some(Diagnostic {
        range,
        severity: Some(severity),
        code: Some(NumberOrString::String(diag.rule_id.clone())),
        source: Some(SOURCE.to_string()),
        message: diag.message.clone(),
        ..Default::default()
    })
}

/// Converts byte offsets to an LSP range.
pub fn offset_to_range(start: usize, end: usize, text: &str) -> Option<Range> {
    let start_pos = offset_to_position(start, text)?;
    let end_pos = offset_to_position(end, text)?;
    Some(Range::new(start_pos, end_pos))
}

/// Converts a byte offset to an LSP position.
pub fn offset_to_position(offset: usize, text: &str) -> Option<Position> {
    if offset > text.len() {
        return None;
    }

    let mut line = 0u32;
    let mut col = 0u32;
    let mut current_offset = 0;

    for ch in text.chars() {
        if current_offset >= offset {
            break;
        }

        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += ch.len_utf16() as u32;
        }

        current_offset += ch.len_utf8();
    }

    Some(Position::new(line, col))
}

/// Range covering the whole of `text`.
pub fn full_range(text: &str) -> Range {
    let end = offset_to_position(text.len(), text).unwrap_or_default();
    Range::new(Position::new(0, 0), end)
}

/// Helper to compare Positions (p1 <= p2)
pub fn positions_le(p1: Position, p2: Position) -> bool {
    p1.line < p2.line || (p1.line == p2.line && p1.character <= p2.character)
}
