//! Diagnostic types for lint results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::span::{Location, Span};

/// Severity level for diagnostics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - breaks the document structure.
    #[default]
    Error,
    /// Warning - style problem worth fixing.
    Warning,
    /// Info - cosmetic.
    Info,
}

impl Severity {
    /// Returns the lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic message from a lint rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The rule that generated this diagnostic.
    pub rule_id: String,

    /// The diagnostic message.
    pub message: String,

    /// Byte span in the source.
    pub span: Span,

    /// Line/column location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<Location>,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// Optional quick fix for this diagnostic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<QuickFix>,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    pub fn new(rule_id: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
            span,
            loc: None,
            severity: Severity::Error,
            fix: None,
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, loc: Location) -> Self {
        self.loc = Some(loc);
        self
    }

    /// Sets a quick fix.
    pub fn with_fix(mut self, fix: QuickFix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Resolves the quick fix against this diagnostic's own range.
    pub fn edit(&self) -> Option<TextEdit> {
        self.fix
            .as_ref()
            .map(|fix| fix.apply(self.span.start, self.span.end))
    }
}

/// A concrete replacement: replace `span` with `text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextEdit {
    /// The byte span to replace.
    pub span: Span,

    /// The replacement text.
    pub text: String,
}

impl TextEdit {
    /// Creates a new edit.
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }

    /// Creates an edit that inserts text at a position.
    pub fn insert(offset: u32, text: impl Into<String>) -> Self {
        Self::new(Span::empty(offset), text)
    }

    /// Creates an edit that deletes a span.
    pub fn delete(span: Span) -> Self {
        Self::new(span, String::new())
    }
}

/// What a quick fix does, independent of where it is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FixKind {
    /// Replace the `#` run at `from` with the run plus one space.
    InsertHeadingSpace { level: u8 },
    /// Delete `[from, to)`.
    RemoveRange,
    /// Delete the blank line at `from` together with the newline before it.
    CollapseBlankLine { line_len: u32 },
    /// Replace the marker character at `from`.
    ReplaceListMarker { expected: char },
    /// Insert a newline and the closing token at `to`.
    AppendClosingFence { token: String },
}

/// A named, one-click correction attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuickFix {
    /// Human readable action name, e.g. "Add space".
    pub name: String,
    /// The correction.
    pub kind: FixKind,
}

impl QuickFix {
    /// Creates a quick fix.
    pub fn new(name: impl Into<String>, kind: FixKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Computes the edit for a diagnostic reported at `[from, to)`.
    ///
    /// Offsets are taken as given; callers holding a newer document version
    /// must re-lint first.
    pub fn apply(&self, from: u32, to: u32) -> TextEdit {
        match &self.kind {
            FixKind::InsertHeadingSpace { level } => {
                let level = *level as usize;
                TextEdit::new(
                    Span::new(from, from + level as u32),
                    format!("{} ", "#".repeat(level)),
                )
            }
            FixKind::RemoveRange => TextEdit::delete(Span::new(from, to)),
            FixKind::CollapseBlankLine { line_len } => {
                TextEdit::delete(Span::new(from.saturating_sub(1), from + line_len))
            }
            FixKind::ReplaceListMarker { expected } => {
                TextEdit::new(Span::new(from, from + 1), expected.to_string())
            }
            FixKind::AppendClosingFence { token } => TextEdit::insert(to, format!("\n{token}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new("heading-space", "Missing space", Span::new(0, 3));

        assert_eq!(diag.rule_id, "heading-space");
        assert_eq!(diag.severity, Severity::Error);
        assert!(diag.fix.is_none());
        assert!(diag.edit().is_none());
    }

    #[test]
    fn test_diagnostic_edit_uses_own_span() {
        let diag = Diagnostic::new("no-trailing-spaces", "Trailing whitespace", Span::new(4, 7))
            .with_severity(Severity::Info)
            .with_fix(QuickFix::new("Remove trailing spaces", FixKind::RemoveRange));

        assert_eq!(diag.edit(), Some(TextEdit::delete(Span::new(4, 7))));
    }

    #[test]
    fn test_apply_heading_space() {
        let fix = QuickFix::new("Add space", FixKind::InsertHeadingSpace { level: 2 });
        assert_eq!(fix.apply(10, 13), TextEdit::new(Span::new(10, 12), "## "));
    }

    #[test]
    fn test_apply_collapse_blank_line() {
        let fix = QuickFix::new(
            "Remove extra blank line",
            FixKind::CollapseBlankLine { line_len: 2 },
        );
        assert_eq!(fix.apply(5, 7), TextEdit::delete(Span::new(4, 7)));
        // No preceding newline at offset 0.
        assert_eq!(fix.apply(0, 1), TextEdit::delete(Span::new(0, 2)));
    }

    #[test]
    fn test_apply_list_marker() {
        let fix = QuickFix::new("Use '-' marker", FixKind::ReplaceListMarker { expected: '-' });
        assert_eq!(fix.apply(4, 5), TextEdit::new(Span::new(4, 5), "-"));
    }

    #[test]
    fn test_apply_closing_fence() {
        let fix = QuickFix::new(
            "Close code block",
            FixKind::AppendClosingFence {
                token: "~~~~".to_string(),
            },
        );
        assert_eq!(fix.apply(9, 10), TextEdit::insert(10, "\n~~~~"));
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
        assert_eq!(Severity::Info.to_string(), "info");
    }

    #[test]
    fn test_diagnostic_json_omits_empty_fields() {
        let diag = Diagnostic::new("no-empty-heading", "Empty heading has no content", Span::new(0, 1));
        let json = serde_json::to_value(&diag).unwrap();
        assert!(json.get("fix").is_none());
        assert!(json.get("loc").is_none());
        assert_eq!(json["severity"], "error");
    }
}
