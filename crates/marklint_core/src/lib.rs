//! # marklint_core
//!
//! Line-oriented Markdown lint and auto-fix engine.
//!
//! This crate provides:
//! - [`lint`]: diagnostics with byte ranges and optional quick fixes
//! - [`fix`]: a deterministic, idempotent rewrite of the whole document
//! - File discovery, parallel file linting and configuration loading
//!   (`native` feature)
//! - Heading outline and SARIF output
//!
//! ## Example
//!
//! ```rust
//! use marklint_core::{fix, lint};
//!
//! let diagnostics = lint("##Title");
//! assert_eq!(diagnostics[0].rule_id, "heading-space");
//! assert_eq!(fix("##Title"), "## Title");
//! ```

pub mod classifier;
#[cfg(feature = "native")]
mod config;
mod diagnostic;
pub mod document;
mod error;
#[cfg(feature = "native")]
pub mod file_finder;
#[cfg(feature = "native")]
mod file_linter;
mod fixer;
pub mod formatters;
mod linter;
mod outline;
mod result;
mod rules;
mod span;
pub mod state;
pub mod syntax;

#[cfg(feature = "native")]
pub use config::{DEFAULT_DEBOUNCE_MS, LinterConfig};
pub use diagnostic::{Diagnostic, FixKind, QuickFix, Severity, TextEdit};
pub use error::LinterError;
#[cfg(feature = "native")]
pub use file_linter::{FileFixOutcome, FixFilesResult, LintFilesResult, Linter};
pub use fixer::{
    FixerResult, apply_edits, apply_fixes_to_content, apply_fixes_to_file, fix, try_fix,
};
pub use formatters::generate_sarif;
pub use linter::{lint, lint_with_locations, try_lint};
pub use outline::{Heading, UNTITLED, outline, title};
pub use result::{LintResult, LintSummary};
pub use rules::RuleId;
pub use span::{Location, Position, Span};
