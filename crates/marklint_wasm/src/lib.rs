//! Browser bindings for marklint.
//!
//! Offsets crossing this boundary are UTF-16 code units, which is what
//! JavaScript strings and browser editors index by.

use marklint_core::{Diagnostic, Severity};
use wasm_bindgen::prelude::*;

/// Converts any `Display`-implementing error into `JsError`.
///
/// We cannot use `impl From<E> for JsError` due to the orphan rule (both
/// traits are from external crates).
fn to_js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

#[cfg(feature = "console_error_panic_hook")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Lints Markdown and returns diagnostics as JavaScript objects.
#[wasm_bindgen]
pub fn lint(text: &str) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&js_diagnostics(text)).map_err(to_js_error)
}

/// Lints Markdown and returns diagnostics as a JSON string.
#[wasm_bindgen(js_name = lintJson)]
pub fn lint_json(text: &str) -> Result<String, JsError> {
    serde_json::to_string(&js_diagnostics(text)).map_err(to_js_error)
}

/// Returns the auto-fixed document.
#[wasm_bindgen]
pub fn fix(text: &str) -> String {
    marklint_core::fix(text)
}

/// Returns the first level-1 heading, or "Untitled".
#[wasm_bindgen]
pub fn title(text: &str) -> String {
    marklint_core::title(text)
}

/// Returns the number of diagnostics in the document.
#[wasm_bindgen(js_name = issueCount)]
pub fn issue_count(text: &str) -> u32 {
    marklint_core::lint(text).len() as u32
}

fn js_diagnostics(text: &str) -> Vec<JsDiagnostic> {
    let offsets = Utf16Offsets::new(text);
    marklint_core::lint(text)
        .into_iter()
        .map(|d| JsDiagnostic::new(d, &offsets))
        .collect()
}

/// Maps UTF-8 byte offsets of one text to UTF-16 code unit offsets.
struct Utf16Offsets {
    /// UTF-16 offset for every byte offset `0..=len`. Bytes inside a
    /// character map to the character's start.
    by_byte: Vec<u32>,
}

impl Utf16Offsets {
    fn new(text: &str) -> Self {
        let mut by_byte = Vec::with_capacity(text.len() + 1);
        let mut units = 0u32;
        for ch in text.chars() {
            by_byte.extend(std::iter::repeat_n(units, ch.len_utf8()));
            units += ch.len_utf16() as u32;
        }
        by_byte.push(units);
        Self { by_byte }
    }

    fn get(&self, byte: u32) -> u32 {
        let last = self.by_byte.len() - 1;
        self.by_byte[(byte as usize).min(last)]
    }
}

/// JavaScript-friendly diagnostic structure.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct JsDiagnostic {
    rule_id: String,
    message: String,
    from: u32,
    to: u32,
    severity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fix: Option<JsFix>,
}

#[derive(Debug, serde::Serialize)]
struct JsFix {
    name: String,
    from: u32,
    to: u32,
    insert: String,
}

impl JsDiagnostic {
    fn new(d: Diagnostic, offsets: &Utf16Offsets) -> Self {
        let fix = d.edit().zip(d.fix.as_ref()).map(|(edit, fix)| JsFix {
            name: fix.name.clone(),
            from: offsets.get(edit.span.start),
            to: offsets.get(edit.span.end),
            insert: edit.text,
        });

        Self {
            from: offsets.get(d.span.start),
            to: offsets.get(d.span.end),
            severity: match d.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Info => "info",
            },
            rule_id: d.rule_id,
            message: d.message,
            fix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wasm_bindgen_test::*;

    #[test]
    fn test_utf16_offsets() {
        let offsets = Utf16Offsets::new("a\u{e9}\u{1F389}b");
        assert_eq!(offsets.get(0), 0);
        assert_eq!(offsets.get(1), 1);
        // inside the two-byte character
        assert_eq!(offsets.get(2), 1);
        assert_eq!(offsets.get(3), 2);
        assert_eq!(offsets.get(7), 4);
        assert_eq!(offsets.get(8), 5);
        assert_eq!(offsets.get(100), 5);
    }

    #[test]
    fn test_utf16_offsets_empty() {
        assert_eq!(Utf16Offsets::new("").get(0), 0);
    }

    #[test]
    fn test_diagnostics_use_utf16_offsets() {
        let diagnostics = js_diagnostics("\u{1F389}\n- a\n* b");

        assert_eq!(diagnostics.len(), 1);
        let d = &diagnostics[0];
        assert_eq!(d.rule_id, "consistent-list-marker");
        assert_eq!(d.severity, "warning");
        // Emoji is 4 bytes but 2 UTF-16 units
        assert_eq!((d.from, d.to), (7, 8));
        let fix = d.fix.as_ref().unwrap();
        assert_eq!((fix.from, fix.to), (7, 8));
        assert_eq!(fix.insert, "-");
        assert_eq!(fix.name, "Use '-' marker");
    }

    #[test]
    fn test_diagnostic_without_fix() {
        let diagnostics = js_diagnostics("#");
        assert_eq!(diagnostics[0].rule_id, "no-empty-heading");
        assert_eq!(diagnostics[0].severity, "error");
        assert!(diagnostics[0].fix.is_none());
    }

    #[test]
    fn test_lint_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&lint_json("```js\ncode").unwrap()).unwrap();
        assert_eq!(json[0]["ruleId"], "fenced-code-closing");
        assert_eq!(json[0]["from"], 9);
        assert_eq!(json[0]["to"], 10);
        assert_eq!(json[0]["fix"]["insert"], "\n```");
        assert_eq!(json[0]["fix"]["from"], 10);
    }

    #[test]
    fn test_fix_title_and_count() {
        assert_eq!(fix("##Title"), "## Title");
        assert_eq!(title("# Notes\n## Sub"), "Notes");
        assert_eq!(title(""), "Untitled");
        assert_eq!(issue_count("##Title  "), 2);
        assert_eq!(issue_count("# Clean"), 0);
    }

    #[wasm_bindgen_test]
    fn test_lint_returns_js_array() {
        let value = lint("##Title").unwrap();
        assert!(value.is_object());
    }
}
