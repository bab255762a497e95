//! Lint result types.

use std::path::PathBuf;

use crate::diagnostic::{Diagnostic, Severity};

/// Result of linting a single file.
#[derive(Debug, Clone)]
pub struct LintResult {
    /// Path to the linted file.
    pub path: PathBuf,

    /// Diagnostics found in the file, ordered by start offset.
    pub diagnostics: Vec<Diagnostic>,
}

impl LintResult {
    /// Creates a new lint result.
    pub fn new(path: PathBuf, diagnostics: Vec<Diagnostic>) -> Self {
        Self { path, diagnostics }
    }

    /// Returns true if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Returns the number of diagnostics with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Returns the number of diagnostics that carry a quick fix.
    pub fn fixable_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.fix.is_some()).count()
    }
}

/// Summary of linting multiple files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LintSummary {
    /// Total files processed.
    pub files_checked: usize,
    /// Files with at least one diagnostic.
    pub files_with_issues: usize,
    /// Diagnostics by severity.
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    /// Diagnostics that carry a quick fix.
    pub fixable: usize,
}

impl LintSummary {
    /// Creates a summary from results.
    pub fn from_results(results: &[LintResult]) -> Self {
        let mut summary = Self::default();

        for result in results {
            summary.files_checked += 1;
            if !result.diagnostics.is_empty() {
                summary.files_with_issues += 1;
            }
            summary.errors += result.count(Severity::Error);
            summary.warnings += result.count(Severity::Warning);
            summary.infos += result.count(Severity::Info);
            summary.fixable += result.fixable_count();
        }

        summary
    }

    /// Total number of diagnostics.
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.infos
    }
}
