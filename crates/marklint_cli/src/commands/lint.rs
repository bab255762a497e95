//! Lint command implementation

use marklint_core::{Linter, Severity};
use miette::{IntoDiagnostic, Result};

use crate::cli::{Cli, OutputFormat};
use crate::fix::{apply_fixes, output_fix_summary};
use crate::output::{output_failures, output_results};
use crate::utils::load_config;

pub fn run_lint(
    cli: &Cli,
    patterns: &[String],
    format: OutputFormat,
    fix: bool,
    dry_run: bool,
) -> Result<bool> {
    let config = load_config(cli)?;
    let linter = Linter::new(config).into_diagnostic()?;

    let (results, failures) = linter.lint_patterns(patterns).into_diagnostic()?;
    output_failures(&failures);

    if fix {
        let fix_summary = apply_fixes(&results, dry_run);
        output_fix_summary(&fix_summary, dry_run);

        if dry_run {
            return Ok(output_results(&results, format)? || !failures.is_empty());
        }

        // Errors without a quick fix are still in the files.
        let unfixed_errors = results.iter().any(|r| {
            r.diagnostics
                .iter()
                .any(|d| d.severity == Severity::Error && d.fix.is_none())
        });
        return Ok(unfixed_errors || !fix_summary.errors.is_empty() || !failures.is_empty());
    }

    let has_errors = output_results(&results, format)?;

    Ok(has_errors || !failures.is_empty())
}
