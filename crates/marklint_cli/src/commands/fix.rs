//! Fix command implementation

use marklint_core::Linter;
use miette::{IntoDiagnostic, Result};
use tracing::info;

use crate::cli::Cli;
use crate::output::output_failures;
use crate::utils::load_config;

/// Runs the whole-document fixer over the matched files.
///
/// Returns true when a file failed, or in check mode when a file would
/// change.
pub fn run_fix(cli: &Cli, patterns: &[String], check: bool) -> Result<bool> {
    let config = load_config(cli)?;
    let linter = Linter::new(config).into_diagnostic()?;

    let files = linter.discover_files(patterns).into_diagnostic()?;
    let (outcomes, failures) = linter.fix_files(&files, check);
    output_failures(&failures);

    let changed: Vec<_> = outcomes.iter().filter(|o| o.changed).collect();
    for outcome in &changed {
        if check {
            println!("Would fix {}", outcome.path.display());
        } else {
            println!("Fixed {}", outcome.path.display());
        }
    }

    info!(
        "{} of {} files {}",
        changed.len(),
        outcomes.len(),
        if check { "need fixing" } else { "fixed" }
    );

    Ok(!failures.is_empty() || (check && !changed.is_empty()))
}
