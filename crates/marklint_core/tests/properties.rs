//! Cross-module properties of the lint and fix passes.

use marklint_core::classifier::Classifier;
use marklint_core::document::Document;
use marklint_core::{RuleId, Severity, Span, apply_edits, fix, lint};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Line fragments that exercise every rule and every structural context.
const FRAGMENTS: &[&str] = &[
    "",
    "  ",
    "\t",
    "text",
    "text  ",
    "with `code` span",
    "open `span",
    "close` span",
    "escaped \\` tick",
    "# Title",
    "##Title",
    "### Deep  ",
    "#",
    "##   ",
    "#######Seven",
    "- item",
    "* item",
    "+ item",
    "  * nested",
    "---",
    "```",
    "```rust",
    "````",
    "~~~",
    "~~~~ text",
    "  ```",
    "é ünïcode",
    "line\r",
];

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..40).prop_map(|lines| lines.join("\n"))
}

fn noisy_document() -> impl Strategy<Value = String> {
    "[#`~\\\\*+\\- \t\r\naxé]{0,120}"
}

/// Opaque lines of `source`, in order.
fn opaque_lines(source: &str) -> Vec<String> {
    let doc = Document::new(source).unwrap();
    Classifier::new(&doc)
        .filter(|line| line.is_opaque())
        .map(|line| line.text.to_string())
        .collect()
}

fn open_fence(source: &str) -> Option<String> {
    let doc = Document::new(source).unwrap();
    let mut classifier = Classifier::new(&doc);
    classifier.by_ref().for_each(drop);
    classifier.open_fence().map(str::to_string)
}

fn resolve_rule(source: &str, rule: RuleId) -> String {
    let edits: Vec<_> = lint(source)
        .iter()
        .filter(|d| d.rule_id == rule.as_str())
        .filter_map(|d| d.edit())
        .collect();
    apply_edits(source, &edits)
}

proptest! {
    #[test]
    fn fix_is_idempotent(source in document()) {
        let once = fix(&source);
        prop_assert_eq!(fix(&once), once);
    }

    #[test]
    fn fix_is_idempotent_on_noise(source in noisy_document()) {
        let once = fix(&source);
        prop_assert_eq!(fix(&once), once);
    }

    #[test]
    fn fix_never_touches_code(source in document()) {
        let mut expected = opaque_lines(&source);
        if let Some(token) = open_fence(&source) {
            expected.push(token);
        }
        prop_assert_eq!(opaque_lines(&fix(&source)), expected);
    }

    #[test]
    fn fixed_output_only_keeps_heading_jumps(source in document()) {
        for diagnostic in lint(&fix(&source)) {
            prop_assert_eq!(diagnostic.rule_id.as_str(), RuleId::HeadingIncrement.as_str());
        }
    }

    #[test]
    fn diagnostics_are_sorted_and_in_bounds(source in noisy_document()) {
        let diagnostics = lint(&source);
        let len = source.len() as u32;
        for d in &diagnostics {
            prop_assert!(d.span.start <= d.span.end && d.span.end <= len);
        }
        prop_assert!(diagnostics.windows(2).all(|w| w[0].span.start <= w[1].span.start));
    }

    #[test]
    fn quick_fixes_resolve_their_rule(source in document()) {
        for rule in RuleId::ALL.into_iter().filter(RuleId::fixable) {
            let fixed = resolve_rule(&source, rule);
            prop_assert!(
                lint(&fixed).iter().all(|d| d.rule_id != rule.as_str()),
                "{} left in {:?}",
                rule,
                fixed
            );
        }
    }
}

#[test]
fn heading_space_example() {
    assert_eq!(fix("##Title"), "## Title");
    let diagnostics = lint("##Title");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].span, Span::new(0, 3));
    assert_eq!(diagnostics[0].severity, Severity::Warning);
}

#[test]
fn trailing_whitespace_example() {
    assert_eq!(fix("Line   \n"), "Line\n");
}

#[test]
fn blank_run_example() {
    assert_eq!(fix("A\n\n\n\nB"), "A\n\nB");
}

#[test]
fn list_marker_example() {
    assert_eq!(fix("- a\n* b\n+ c"), "- a\n- b\n- c");
    let spans: Vec<_> = lint("- a\n* b\n+ c").iter().map(|d| d.span).collect();
    assert_eq!(spans, vec![Span::new(4, 5), Span::new(8, 9)]);
}

#[test]
fn unclosed_fence_example() {
    let diagnostics = lint("```js\ncode");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].span, Span::new(9, 10));
    assert_eq!(fix("```js\ncode"), "```js\ncode\n```");
}

#[test]
fn fenced_block_bytes_survive() {
    let block = "~~~python  \n#comment\n\n\n\n* not a list\n~~~";
    let source = format!("#Intro\n{block}\n- item");
    assert!(fix(&source).contains(block));
}

#[test]
fn quick_fix_and_fix_agree_on_simple_input() {
    let source = "##Title  \n\n\n- a\n* b";
    let mut text = source.to_string();
    for rule in RuleId::ALL.into_iter().filter(RuleId::fixable) {
        text = resolve_rule(&text, rule);
    }
    assert_eq!(text, fix(source));
}
