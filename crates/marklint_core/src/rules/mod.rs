//! The fixed rule set.
//!
//! Line rules run in a fixed order on every non-opaque line. The closing
//! fence check runs once after the last line.

mod empty_heading;
mod fence_closing;
mod heading_increment;
mod heading_space;
mod list_marker;
mod multiple_blanks;
mod trailing_spaces;

use std::fmt;

use crate::classifier::ClassifiedLine;
use crate::diagnostic::{Diagnostic, Severity};
use crate::span::Span;
use crate::state::RollingState;
use crate::syntax::{self, HeadingShape};

/// Identifier of a built-in rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleId {
    HeadingSpace,
    NoEmptyHeading,
    HeadingIncrement,
    NoTrailingSpaces,
    NoMultipleBlanks,
    ConsistentListMarker,
    FencedCodeClosing,
}

impl RuleId {
    /// Every rule, in evaluation order.
    pub const ALL: [RuleId; 7] = [
        RuleId::HeadingSpace,
        RuleId::NoEmptyHeading,
        RuleId::HeadingIncrement,
        RuleId::NoTrailingSpaces,
        RuleId::NoMultipleBlanks,
        RuleId::ConsistentListMarker,
        RuleId::FencedCodeClosing,
    ];

    /// Returns the kebab-case rule id.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::HeadingSpace => "heading-space",
            RuleId::NoEmptyHeading => "no-empty-heading",
            RuleId::HeadingIncrement => "heading-increment",
            RuleId::NoTrailingSpaces => "no-trailing-spaces",
            RuleId::NoMultipleBlanks => "no-multiple-blanks",
            RuleId::ConsistentListMarker => "consistent-list-marker",
            RuleId::FencedCodeClosing => "fenced-code-closing",
        }
    }

    /// Looks up a rule by id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.as_str() == id)
    }

    /// Returns a one-line description.
    pub fn description(&self) -> &'static str {
        match self {
            RuleId::HeadingSpace => "Require a space between '#' and the heading text",
            RuleId::NoEmptyHeading => "Disallow headings without text",
            RuleId::HeadingIncrement => "Heading levels should only increase by one",
            RuleId::NoTrailingSpaces => "Disallow trailing spaces and tabs",
            RuleId::NoMultipleBlanks => "Disallow more than one consecutive blank line",
            RuleId::ConsistentListMarker => {
                "Top-level list items use the same marker as the first one"
            }
            RuleId::FencedCodeClosing => "Fenced code blocks must be closed",
        }
    }

    /// Returns the severity of diagnostics from this rule.
    pub fn severity(&self) -> Severity {
        match self {
            RuleId::NoEmptyHeading | RuleId::FencedCodeClosing => Severity::Error,
            RuleId::HeadingSpace | RuleId::HeadingIncrement | RuleId::ConsistentListMarker => {
                Severity::Warning
            }
            RuleId::NoTrailingSpaces | RuleId::NoMultipleBlanks => Severity::Info,
        }
    }

    /// Returns true if diagnostics from this rule carry a quick fix.
    pub fn fixable(&self) -> bool {
        !matches!(self, RuleId::NoEmptyHeading | RuleId::HeadingIncrement)
    }

    /// Starts a diagnostic for this rule with its severity.
    pub(crate) fn diagnostic(&self, message: impl Into<String>, span: Span) -> Diagnostic {
        Diagnostic::new(self.as_str(), message, span).with_severity(self.severity())
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a line rule sees.
pub(crate) struct LineContext<'l, 'a> {
    pub line: &'l ClassifiedLine<'a>,
    pub heading: Option<HeadingShape>,
    pub doc_len: u32,
}

impl<'l, 'a> LineContext<'l, 'a> {
    pub fn new(line: &'l ClassifiedLine<'a>, doc_len: u32) -> Self {
        Self {
            line,
            heading: syntax::heading_shape(line.text),
            doc_len,
        }
    }

    /// Absolute start offset of the line.
    pub fn start(&self) -> u32 {
        self.line.info.start
    }

    /// Absolute end offset of the line content.
    pub fn end(&self) -> u32 {
        self.line.info.end
    }
}

/// Runs every line rule on a non-opaque line.
pub(crate) fn check_line(
    line: &ClassifiedLine<'_>,
    doc_len: u32,
    state: &mut RollingState,
    out: &mut Vec<Diagnostic>,
) {
    let ctx = LineContext::new(line, doc_len);
    heading_space::check(&ctx, out);
    empty_heading::check(&ctx, out);
    heading_increment::check(&ctx, state, out);
    trailing_spaces::check(&ctx, out);
    multiple_blanks::check(&ctx, state, out);
    list_marker::check(&ctx, state, out);
}

/// Runs the end-of-document checks.
pub(crate) fn check_end(open_fence: Option<&str>, doc_len: u32, out: &mut Vec<Diagnostic>) {
    fence_closing::check(open_fence, doc_len, out);
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_ids_round_trip() {
        for rule in RuleId::ALL {
            assert_eq!(RuleId::from_id(rule.as_str()), Some(rule));
        }
        assert_eq!(RuleId::from_id("no-such-rule"), None);
    }

    #[test]
    fn test_fixable_rules() {
        let fixable: Vec<_> = RuleId::ALL
            .iter()
            .filter(|rule| rule.fixable())
            .map(|rule| rule.as_str())
            .collect();
        assert_eq!(
            fixable,
            vec![
                "heading-space",
                "no-trailing-spaces",
                "no-multiple-blanks",
                "consistent-list-marker",
                "fenced-code-closing",
            ]
        );
    }
}
